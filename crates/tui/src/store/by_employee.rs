use std::sync::Arc;

use api_types::transaction::Transaction;

use super::{FetchState, Resource};
use crate::client::{ClientError, DataProvider};

#[derive(Clone)]
pub struct TransactionsByEmployeeStore {
    provider: Arc<dyn DataProvider>,
    resource: Resource<Vec<Transaction>>,
}

impl TransactionsByEmployeeStore {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            resource: Resource::new("transactions_by_employee"),
        }
    }

    pub async fn fetch_by_id(&self, employee_id: &str) -> Result<(), ClientError> {
        self.resource
            .fetch(self.provider.transactions_by_employee(employee_id))
            .await
    }

    pub fn invalidate_data(&self) {
        self.resource.invalidate();
    }

    pub fn read<R>(&self, f: impl FnOnce(&FetchState<Vec<Transaction>>) -> R) -> R {
        self.resource.read(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::FakeProvider;

    use super::*;

    #[tokio::test]
    async fn each_fetch_replaces_the_list() {
        let store = TransactionsByEmployeeStore::new(Arc::new(FakeProvider::scenario()));

        store.fetch_by_id("alice").await.unwrap();
        assert_eq!(store.read(|state| state.data().map(Vec::len)), Some(2));

        store.fetch_by_id("bob").await.unwrap();
        let ids = store.read(|state| {
            state
                .data()
                .map(|rows| rows.iter().map(|tx| tx.id.clone()).collect::<Vec<_>>())
        });
        assert_eq!(ids, Some(vec!["t6".to_string()]));
    }

    #[tokio::test]
    async fn unknown_employee_yields_empty_list_not_none() {
        let store = TransactionsByEmployeeStore::new(Arc::new(FakeProvider::scenario()));
        store.fetch_by_id("carol").await.unwrap();
        assert_eq!(store.read(|state| state.data().map(Vec::len)), Some(0));

        store.invalidate_data();
        assert!(store.read(|state| state.data().is_none()));
    }
}

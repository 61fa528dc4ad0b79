use std::sync::Arc;

use api_types::transaction::{PaginatedResponse, Transaction};

use super::{FetchState, Resource};
use crate::client::{ClientError, DataProvider};

#[derive(Clone)]
pub struct PaginatedTransactionsStore {
    provider: Arc<dyn DataProvider>,
    resource: Resource<PaginatedResponse<Transaction>>,
}

impl PaginatedTransactionsStore {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            resource: Resource::new("paginated_transactions"),
        }
    }

    /// Fetches the page after the last one received and appends it. Starts
    /// from the first page when nothing is loaded; does nothing once the
    /// last page is in or while a page request is already pending.
    pub async fn fetch_all(&self) -> Result<(), ClientError> {
        let next = self.resource.begin_if_idle(|data| match data {
            None => Some(None),
            Some(page) => page.next_page.clone().map(Some),
        });
        let Some((ticket, cursor)) = next else {
            tracing::debug!("paginated_transactions: nothing to fetch");
            return Ok(());
        };

        let result = self.provider.paginated_transactions(cursor).await;
        self.resource.settle(ticket, result)
    }

    /// The cursor goes with the data.
    pub fn invalidate_data(&self) {
        self.resource.invalidate();
    }

    pub fn read<R>(&self, f: impl FnOnce(&FetchState<PaginatedResponse<Transaction>>) -> R) -> R {
        self.resource.read(f)
    }
}

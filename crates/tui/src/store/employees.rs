use std::sync::Arc;

use api_types::employee::Employee;

use super::{FetchState, Resource};
use crate::client::{ClientError, DataProvider};

#[derive(Clone)]
pub struct EmployeesStore {
    provider: Arc<dyn DataProvider>,
    resource: Resource<Vec<Employee>>,
}

impl EmployeesStore {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            resource: Resource::new("employees"),
        }
    }

    pub async fn fetch_all(&self) -> Result<(), ClientError> {
        self.resource.fetch(self.provider.employees()).await
    }

    pub fn invalidate_data(&self) {
        self.resource.invalidate();
    }

    pub fn read<R>(&self, f: impl FnOnce(&FetchState<Vec<Employee>>) -> R) -> R {
        self.resource.read(f)
    }
}

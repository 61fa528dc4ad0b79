use std::{fs, time::Duration};

use api_types::{
    employee::Employee,
    transaction::{PaginatedResponse, Transaction},
};
use async_trait::async_trait;
use serde::Deserialize;

use super::{ClientError, DataProvider};
use crate::error::Result;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Deserialize)]
struct FixtureFile {
    employees: Vec<Employee>,
    transactions: Vec<Transaction>,
}

/// Serves employees and transactions from a JSON file, paging the same way
/// the real backend does. Useful for demos and for running without a server.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    employees: Vec<Employee>,
    transactions: Vec<Transaction>,
    page_size: usize,
    latency: Duration,
}

impl FixtureProvider {
    pub fn new(employees: Vec<Employee>, transactions: Vec<Transaction>) -> Self {
        Self {
            employees,
            transactions,
            page_size: DEFAULT_PAGE_SIZE,
            latency: Duration::ZERO,
        }
    }

    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: FixtureFile = serde_json::from_str(&content)?;
        tracing::info!(
            "loaded fixture {path}: {} employees, {} transactions",
            file.employees.len(),
            file.transactions.len()
        );
        Ok(Self::new(file.employees, file.transactions))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn parse_page(page: Option<&str>) -> std::result::Result<usize, ClientError> {
    match page {
        None => Ok(0),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ClientError::Validation(format!("invalid page {raw}"))),
    }
}

#[async_trait]
impl DataProvider for FixtureProvider {
    async fn employees(&self) -> std::result::Result<Vec<Employee>, ClientError> {
        self.simulate_latency().await;
        Ok(self.employees.clone())
    }

    async fn paginated_transactions(
        &self,
        page: Option<String>,
    ) -> std::result::Result<PaginatedResponse<Transaction>, ClientError> {
        self.simulate_latency().await;

        let page = parse_page(page.as_deref())?;
        let start = page
            .checked_mul(self.page_size)
            .filter(|start| *start <= self.transactions.len())
            .ok_or_else(|| ClientError::Validation(format!("invalid page {page}")))?;
        let end = (start + self.page_size).min(self.transactions.len());
        let next_page = (end < self.transactions.len()).then(|| (page + 1).to_string());

        Ok(PaginatedResponse {
            data: self.transactions[start..end].to_vec(),
            next_page,
        })
    }

    async fn transactions_by_employee(
        &self,
        employee_id: &str,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        self.simulate_latency().await;

        if employee_id.is_empty() {
            return Err(ClientError::Validation(
                "employee id cannot be empty".to_string(),
            ));
        }

        Ok(self
            .transactions
            .iter()
            .filter(|tx| tx.employee_id() == employee_id)
            .cloned()
            .collect())
    }
}

//! Test doubles shared by the unit tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use api_types::{
    employee::Employee,
    transaction::{PaginatedResponse, Transaction},
};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::{ClientError, DataProvider};

pub fn employee(id: &str, first: &str, last: &str) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

pub fn transaction(id: &str, owner: &Employee, approved: bool) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: 10.0,
        employee: owner.clone(),
        merchant: format!("Merchant {id}"),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        approved,
    }
}

pub fn page(ids: &[&str], owner: &Employee, next_page: Option<&str>) -> PaginatedResponse<Transaction> {
    PaginatedResponse {
        data: ids.iter().map(|id| transaction(id, owner, false)).collect(),
        next_page: next_page.map(str::to_string),
    }
}

/// Scripted provider with per-endpoint delays, call counters and failure switches.
#[derive(Default)]
pub struct FakeProvider {
    pub employees: Vec<Employee>,
    /// Keyed by the requested cursor; `None` is the first page.
    pub pages: HashMap<Option<String>, PaginatedResponse<Transaction>>,
    pub by_employee: HashMap<String, Vec<Transaction>>,
    pub employees_delay: Duration,
    pub pages_delay: Duration,
    pub by_employee_delay: Duration,
    pub fail_employees: AtomicBool,
    pub fail_pages: AtomicBool,
    pub fail_by_employee: AtomicBool,
    pub employee_calls: AtomicU64,
    pub page_calls: AtomicU64,
    pub by_employee_calls: AtomicU64,
    pub requested_pages: Mutex<Vec<Option<String>>>,
}

impl FakeProvider {
    /// Alice has two transactions of her own, the paginated listing has
    /// five items and a second page of three.
    pub fn scenario() -> Self {
        let alice = employee("alice", "Alice", "Smith");
        let bob = employee("bob", "Bob", "Jones");

        let mut pages = HashMap::new();
        pages.insert(None, page(&["t1", "t2", "t3", "t4", "t5"], &alice, Some("p2")));
        pages.insert(Some("p2".to_string()), page(&["t6", "t7", "t8"], &bob, None));

        let mut by_employee = HashMap::new();
        by_employee.insert(
            "alice".to_string(),
            vec![transaction("t1", &alice, false), transaction("t2", &alice, true)],
        );
        by_employee.insert("bob".to_string(), vec![transaction("t6", &bob, false)]);

        Self {
            employees: vec![alice, bob],
            pages,
            by_employee,
            ..Self::default()
        }
    }

    pub fn calls(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for FakeProvider {
    async fn employees(&self) -> Result<Vec<Employee>, ClientError> {
        self.employee_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.employees_delay).await;
        if self.fail_employees.load(Ordering::SeqCst) {
            return Err(ClientError::Server("employees unavailable".to_string()));
        }
        Ok(self.employees.clone())
    }

    async fn paginated_transactions(
        &self,
        page: Option<String>,
    ) -> Result<PaginatedResponse<Transaction>, ClientError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_pages.lock().unwrap().push(page.clone());
        tokio::time::sleep(self.pages_delay).await;
        if self.fail_pages.load(Ordering::SeqCst) {
            return Err(ClientError::Server("transactions unavailable".to_string()));
        }
        self.pages.get(&page).cloned().ok_or(ClientError::NotFound)
    }

    async fn transactions_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<Transaction>, ClientError> {
        self.by_employee_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.by_employee_delay).await;
        if self.fail_by_employee.load(Ordering::SeqCst) {
            return Err(ClientError::Server("employee lookup failed".to_string()));
        }
        Ok(self
            .by_employee
            .get(employee_id)
            .cloned()
            .unwrap_or_default())
    }
}

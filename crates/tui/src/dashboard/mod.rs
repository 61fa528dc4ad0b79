mod approvals;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api_types::{employee::Employee, transaction::Transaction};

use crate::{
    client::{ClientError, DataProvider},
    store::{EmployeesStore, PaginatedTransactionsStore, TransactionsByEmployeeStore},
};

pub use approvals::ApprovalOverrides;

/// Id of the "All employees" entry. Real employee ids are never empty.
pub const ALL_EMPLOYEES_ID: &str = "";

pub fn all_employees() -> Employee {
    Employee {
        id: ALL_EMPLOYEES_ID.to_string(),
        first_name: "All".to_string(),
        last_name: "Employees".to_string(),
    }
}

/// A transaction as displayed, with the client override already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub approved: bool,
}

/// Point-in-time copy of everything the UI draws.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub employees: Option<Vec<Employee>>,
    pub employees_loading: bool,
    pub transactions: Option<Vec<TransactionRow>>,
    pub transactions_loading: bool,
    pub employee_transactions_loading: bool,
    pub is_employee_filtered: bool,
    pub has_more_pages: bool,
    pub is_initial_loading: bool,
    pub errors: Vec<String>,
}

impl DashboardView {
    pub fn view_more_visible(&self) -> bool {
        !self.is_initial_loading
            && !self.employee_transactions_loading
            && !self.is_employee_filtered
            && self.has_more_pages
    }

    pub fn view_more_enabled(&self) -> bool {
        self.view_more_visible() && !self.transactions_loading
    }
}

/// Composes the three stores and the approval overrides.
///
/// Cloning is cheap and every clone shares the same state, so operations can
/// be spawned onto the runtime while the UI keeps rendering.
#[derive(Clone)]
pub struct Dashboard {
    employees: EmployeesStore,
    paginated: PaginatedTransactionsStore,
    by_employee: TransactionsByEmployeeStore,
    approvals: Arc<Mutex<ApprovalOverrides>>,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            employees: EmployeesStore::new(Arc::clone(&provider)),
            paginated: PaginatedTransactionsStore::new(Arc::clone(&provider)),
            by_employee: TransactionsByEmployeeStore::new(provider),
            approvals: Arc::new(Mutex::new(ApprovalOverrides::default())),
        }
    }

    fn approvals(&self) -> MutexGuard<'_, ApprovalOverrides> {
        self.approvals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initial load. Runs only while no employees are loaded or loading, and
    /// issues both fetches at once.
    pub async fn mount(&self) -> Result<(), ClientError> {
        let idle = self
            .employees
            .read(|state| state.data().is_none() && !state.loading());
        if !idle {
            return Ok(());
        }

        tracing::debug!("mount: fetching employees and first transactions page");
        let (employees, transactions) =
            tokio::join!(self.employees.fetch_all(), self.paginated.fetch_all());
        employees.and(transactions)
    }

    /// Refetches what is missing or failed and leaves loaded data alone.
    /// `selected` is the current filter choice, so a failed employee filter
    /// is retried as such instead of falling back to the paginated list.
    pub async fn retry(&self, selected: &Employee) -> Result<(), ClientError> {
        let employees = async {
            let (loaded, loading, failed) = self.employees.read(|state| {
                (state.data().is_some(), state.loading(), state.error().is_some())
            });
            if loading || (loaded && !failed) {
                return Ok(());
            }
            if failed {
                self.employees.invalidate_data();
            }
            self.employees.fetch_all().await
        };

        let transactions = async {
            if selected.id == ALL_EMPLOYEES_ID {
                if self.paginated.read(|state| state.data().is_some()) {
                    return Ok(());
                }
                self.paginated.fetch_all().await
            } else {
                let missing = self
                    .by_employee
                    .read(|state| state.data().is_none() && !state.loading());
                if !missing {
                    return Ok(());
                }
                self.load_transactions_by_employee(&selected.id).await
            }
        };

        tracing::info!("retry: refetching missing data");
        let (employees, transactions) = tokio::join!(employees, transactions);
        employees.and(transactions)
    }

    pub async fn load_all_transactions(&self) -> Result<(), ClientError> {
        self.by_employee.invalidate_data();
        self.employees.fetch_all().await?;
        self.paginated.fetch_all().await
    }

    pub async fn load_transactions_by_employee(&self, employee_id: &str) -> Result<(), ClientError> {
        self.paginated.invalidate_data();
        self.by_employee.fetch_by_id(employee_id).await
    }

    /// Filter change. `None` (cleared field) leaves everything as is.
    pub async fn select_employee(&self, selection: Option<&Employee>) -> Result<(), ClientError> {
        let Some(employee) = selection else {
            return Ok(());
        };

        if employee.id == ALL_EMPLOYEES_ID {
            tracing::info!("filter: all employees");
            self.load_all_transactions().await
        } else {
            tracing::info!("filter: employee {}", employee.id);
            self.load_transactions_by_employee(&employee.id).await
        }
    }

    /// "View More": appends the next page. Ignored while the button is not
    /// available.
    pub async fn fetch_more(&self) -> Result<(), ClientError> {
        if !self.view().view_more_enabled() {
            return Ok(());
        }
        self.paginated.fetch_all().await
    }

    pub fn set_transaction_approval(&self, transaction_id: &str, new_value: bool) {
        tracing::debug!("approval override {transaction_id} -> {new_value}");
        self.approvals().set(transaction_id, new_value);
    }

    pub fn view(&self) -> DashboardView {
        let (employees, employees_loading, employees_error) = self.employees.read(|state| {
            (
                state.data().cloned(),
                state.loading(),
                state.error().map(str::to_string),
            )
        });
        let (filtered, employee_transactions_loading, filtered_error) =
            self.by_employee.read(|state| {
                (
                    state.data().cloned(),
                    state.loading(),
                    state.error().map(str::to_string),
                )
            });
        let (paginated, has_more_pages, transactions_loading, paginated_error) =
            self.paginated.read(|state| {
                (
                    state.data().map(|page| page.data.clone()),
                    state.data().is_some_and(|page| page.next_page.is_some()),
                    state.loading(),
                    state.error().map(str::to_string),
                )
            });

        let is_employee_filtered = filtered.is_some();
        let transactions = {
            let approvals = self.approvals();
            filtered
                .or(paginated)
                .map(|source| rows(source, &approvals))
        };
        let is_initial_loading = transactions.is_none() && transactions_loading;

        DashboardView {
            employees,
            employees_loading,
            transactions,
            transactions_loading,
            employee_transactions_loading,
            is_employee_filtered,
            has_more_pages,
            is_initial_loading,
            errors: [employees_error, paginated_error, filtered_error]
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}

fn rows(source: Vec<Transaction>, approvals: &ApprovalOverrides) -> Vec<TransactionRow> {
    source
        .into_iter()
        .map(|transaction| TransactionRow {
            approved: approvals.effective(&transaction),
            transaction,
        })
        .collect()
}

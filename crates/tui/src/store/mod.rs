mod by_employee;
mod employees;
mod paginated;

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use api_types::transaction::PaginatedResponse;

use crate::client::ClientError;

pub use by_employee::TransactionsByEmployeeStore;
pub use employees::EmployeesStore;
pub use paginated::PaginatedTransactionsStore;

/// How a freshly fetched payload combines with what a store already holds.
pub trait Absorb: Sized {
    fn absorb(_previous: Option<Self>, incoming: Self) -> Self {
        incoming
    }
}

impl<T> Absorb for Vec<T> {}

/// Pages accumulate: new items are appended and the cursor moves forward.
impl<T> Absorb for PaginatedResponse<T> {
    fn absorb(previous: Option<Self>, incoming: Self) -> Self {
        match previous {
            None => incoming,
            Some(mut previous) => {
                previous.data.extend(incoming.data);
                previous.next_page = incoming.next_page;
                previous
            }
        }
    }
}

/// `data == None` means never fetched or invalidated, which is not the same
/// as an empty result.
#[derive(Debug)]
pub struct FetchState<T> {
    data: Option<T>,
    in_flight: usize,
    /// Requests in flight for the current generation only.
    pending: usize,
    generation: u64,
    error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            in_flight: 0,
            pending: 0,
            generation: 0,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Issued when a request starts; a response is only applied if the store
/// has not been invalidated since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Shared handle over one endpoint's `{ data, loading }` state.
#[derive(Debug)]
pub struct Resource<T> {
    name: &'static str,
    state: Arc<Mutex<FetchState<T>>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Absorb> Resource<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(FetchState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FetchState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(&self.lock())
    }

    /// Drops the data and orphans any request still in flight. `loading` is
    /// left as is.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.data = None;
        state.pending = 0;
        state.generation += 1;
        tracing::debug!("{}: invalidated (generation {})", self.name, state.generation);
    }

    pub fn begin(&self) -> Ticket {
        Self::start(&mut self.lock())
    }

    /// Starts a request unless one for the current generation is still
    /// pending. `plan` sees the data under the same lock and returns the
    /// request argument, or `None` when there is nothing to fetch.
    pub fn begin_if_idle<A>(
        &self,
        plan: impl FnOnce(Option<&T>) -> Option<A>,
    ) -> Option<(Ticket, A)> {
        let mut state = self.lock();
        if state.pending > 0 {
            tracing::debug!("{}: request already pending", self.name);
            return None;
        }
        let argument = plan(state.data.as_ref())?;
        Some((Self::start(&mut state), argument))
    }

    fn start(state: &mut FetchState<T>) -> Ticket {
        state.in_flight += 1;
        state.pending += 1;
        Ticket {
            generation: state.generation,
        }
    }

    pub fn settle(&self, ticket: Ticket, result: Result<T, ClientError>) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        let current = ticket.generation == state.generation;
        if current {
            state.pending = state.pending.saturating_sub(1);
        }

        match result {
            Ok(incoming) if current => {
                let previous = state.data.take();
                state.data = Some(T::absorb(previous, incoming));
                state.error = None;
                Ok(())
            }
            Ok(_) => {
                tracing::debug!("{}: discarded stale response", self.name);
                Ok(())
            }
            Err(err) => {
                if current {
                    state.error = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    pub async fn fetch<F>(&self, request: F) -> Result<(), ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let ticket = self.begin();
        tracing::debug!("{}: fetching", self.name);
        let result = request.await;
        self.settle(ticket, result)
    }
}

//! Per-unit-of-work connection to the in-memory store.
//!
//! Outside a transaction every call takes the store lock briefly. Inside a
//! transaction the connection owns the lock until commit, rollback, or drop,
//! and a snapshot taken at `begin` is restored unless the transaction is
//! committed.

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use crate::domain::ports::EmployeePersistenceError;

use super::store::{InMemoryEmployeeStore, StoreState};

const TRANSACTION_IN_PROGRESS: &str = "A transaction is already in progress.";
const NO_TRANSACTION: &str = "No transaction is in progress.";

pub(super) struct StoreConnection {
    store: InMemoryEmployeeStore,
    transaction: Option<Transaction>,
}

impl StoreConnection {
    pub(super) fn new(store: InMemoryEmployeeStore) -> Self {
        Self {
            store,
            transaction: None,
        }
    }

    pub(super) fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Run `f` against the table, through the transaction lock when open.
    pub(super) async fn with_state<R>(&mut self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        match self.transaction.as_mut() {
            Some(transaction) => f(&mut transaction.guard),
            None => {
                let mut state = self.store.state.lock().await;
                f(&mut state)
            }
        }
    }

    pub(super) async fn begin(&mut self) -> Result<(), EmployeePersistenceError> {
        if self.in_transaction() {
            return Err(EmployeePersistenceError::invalid_operation(
                TRANSACTION_IN_PROGRESS,
            ));
        }
        let guard = Arc::clone(&self.store.state).lock_owned().await;
        let snapshot = guard.clone();
        self.transaction = Some(Transaction {
            guard,
            snapshot: Some(snapshot),
        });
        debug!("store transaction started");
        Ok(())
    }

    pub(super) fn commit(&mut self) -> Result<(), EmployeePersistenceError> {
        let mut transaction = self.take_transaction()?;
        transaction.snapshot = None;
        debug!("store transaction committed");
        Ok(())
    }

    pub(super) fn rollback(&mut self) -> Result<(), EmployeePersistenceError> {
        drop(self.take_transaction()?);
        debug!("store transaction rolled back");
        Ok(())
    }

    fn take_transaction(&mut self) -> Result<Transaction, EmployeePersistenceError> {
        self.transaction
            .take()
            .ok_or_else(|| EmployeePersistenceError::invalid_operation(NO_TRANSACTION))
    }
}

/// Writer lock plus the state to restore on rollback.
struct Transaction {
    guard: OwnedMutexGuard<StoreState>,
    snapshot: Option<StoreState>,
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}

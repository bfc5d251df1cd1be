//! In-memory `UnitOfWork` and its factory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{
    EmployeePersistenceError, EmployeeRepository, UnitOfWork, UnitOfWorkFactory,
};

use super::connection::StoreConnection;
use super::repository::InMemoryEmployeeRepository;
use super::store::InMemoryEmployeeStore;

/// One business operation's view of the store.
///
/// The connection is shared with the lazily built repository; dropping the
/// unit of work drops both and rolls back any open transaction.
pub struct InMemoryUnitOfWork {
    connection: Arc<Mutex<StoreConnection>>,
    employees: Option<InMemoryEmployeeRepository>,
}

impl InMemoryUnitOfWork {
    pub fn new(store: InMemoryEmployeeStore) -> Self {
        Self {
            connection: Arc::new(Mutex::new(StoreConnection::new(store))),
            employees: None,
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn employees(&mut self) -> &mut dyn EmployeeRepository {
        let connection = &self.connection;
        self.employees
            .get_or_insert_with(|| InMemoryEmployeeRepository::new(Arc::clone(connection)))
    }

    async fn save_changes(&mut self) -> Result<usize, EmployeePersistenceError> {
        let Some(repository) = self.employees.as_mut() else {
            return Ok(0);
        };
        let changes = repository.take_pending();
        repository.forget_versions();
        if changes.is_empty() {
            return Ok(0);
        }

        let result = {
            let mut connection = self.connection.lock().await;
            connection.with_state(|state| state.apply(changes)).await
        };
        match &result {
            Ok(affected) => debug!(affected = *affected, "employee changes saved"),
            Err(error) => warn!(error = %error, "employee changes rejected"),
        }
        result
    }

    async fn begin_transaction(&mut self) -> Result<(), EmployeePersistenceError> {
        self.connection.lock().await.begin().await
    }

    async fn commit_transaction(&mut self) -> Result<(), EmployeePersistenceError> {
        if !self.connection.lock().await.in_transaction() {
            return Err(EmployeePersistenceError::invalid_operation(
                "No transaction is in progress.",
            ));
        }
        if let Err(error) = self.save_changes().await {
            let rollback = self.connection.lock().await.rollback();
            if let Err(rollback_error) = rollback {
                warn!(error = %rollback_error, "rollback after failed commit also failed");
            }
            return Err(error);
        }
        self.connection.lock().await.commit()
    }

    async fn rollback_transaction(&mut self) -> Result<(), EmployeePersistenceError> {
        self.connection.lock().await.rollback()?;
        if let Some(repository) = self.employees.as_mut() {
            repository.take_pending();
            repository.forget_versions();
        }
        Ok(())
    }
}

/// Opens an [`InMemoryUnitOfWork`] over a shared store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWorkFactory {
    store: InMemoryEmployeeStore,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(store: InMemoryEmployeeStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InMemoryEmployeeStore {
        &self.store
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    async fn open(&self) -> Result<Box<dyn UnitOfWork>, EmployeePersistenceError> {
        Ok(Box::new(InMemoryUnitOfWork::new(self.store.clone())))
    }
}

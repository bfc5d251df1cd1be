//! Transaction boundary ports.
//!
//! One [`UnitOfWork`] backs one business operation. It hands out a single
//! cached [`EmployeeRepository`], flushes staged writes atomically, and
//! guards an optional explicit transaction. Dropping a unit of work with an
//! open transaction rolls it back.

use async_trait::async_trait;

use super::{EmployeePersistenceError, EmployeeRepository};

#[async_trait]
pub trait UnitOfWork: Send {
    /// The employee repository bound to this unit of work, built on first use.
    fn employees(&mut self) -> &mut dyn EmployeeRepository;

    /// Flush staged writes and return the number of affected rows.
    ///
    /// Either every staged write becomes visible or none does. Staged writes
    /// are discarded after a failed flush.
    async fn save_changes(&mut self) -> Result<usize, EmployeePersistenceError>;

    /// Open a transaction. Fails with
    /// [`EmployeePersistenceError::InvalidOperation`] when one is already open.
    async fn begin_transaction(&mut self) -> Result<(), EmployeePersistenceError>;

    /// Save pending changes and commit. On failure the transaction is rolled
    /// back before the error is returned.
    async fn commit_transaction(&mut self) -> Result<(), EmployeePersistenceError>;

    async fn rollback_transaction(&mut self) -> Result<(), EmployeePersistenceError>;
}

/// Opens a fresh [`UnitOfWork`] per business operation.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn UnitOfWork>, EmployeePersistenceError>;
}

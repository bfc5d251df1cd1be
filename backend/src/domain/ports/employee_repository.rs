//! Port abstraction for employee persistence adapters and their errors.
//!
//! A repository is scoped to one unit of work: writes are staged and only
//! become visible to other units of work once
//! [`UnitOfWork::save_changes`](super::UnitOfWork::save_changes) succeeds.
//! Reads see the unit's own staged writes.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by employee repository and unit-of-work
    /// adapters.
    pub enum EmployeePersistenceError {
        /// The targeted row does not exist.
        NotFound { id: i32 } => "Employee with ID {id} not found",
        /// The row changed since this unit of work read it.
        ConcurrencyConflict { message: String } => "{message}",
        /// A write was rejected by the store, e.g. a unique index violation.
        PersistenceFailure { message: String } =>
            "employee store write failed: {message}",
        /// The call is not valid in the current transaction state.
        InvalidOperation { message: String } => "{message}",
        /// The store could not be reached.
        Connection { message: String } =>
            "employee store connection failed: {message}",
    }
}

/// Message carried by [`EmployeePersistenceError::ConcurrencyConflict`].
pub const CONCURRENCY_CONFLICT_MESSAGE: &str =
    "Concurrency conflict occurred. The record has been modified by another user.";

/// Employee persistence operations.
///
/// Listing methods order results by last name, then first name. Email and
/// department comparisons ignore case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send {
    async fn get_all(&mut self) -> Result<Vec<Employee>, EmployeePersistenceError>;

    async fn get_by_id(
        &mut self,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeePersistenceError>;

    async fn get_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<Employee>, EmployeePersistenceError>;

    async fn get_by_department(
        &mut self,
        department: &str,
    ) -> Result<Vec<Employee>, EmployeePersistenceError>;

    /// Active employees only.
    async fn get_active(&mut self) -> Result<Vec<Employee>, EmployeePersistenceError>;

    /// Assign an identifier and stage the insert. Returns the staged entity.
    async fn add(&mut self, employee: Employee) -> Result<Employee, EmployeePersistenceError>;

    /// Stage an overwrite of every field except the creation timestamp.
    ///
    /// Fails with [`EmployeePersistenceError::NotFound`] when no row carries
    /// the entity's identifier.
    async fn update(&mut self, employee: Employee) -> Result<Employee, EmployeePersistenceError>;

    /// Stage a delete. Returns `false` when no such row exists.
    async fn delete(&mut self, id: EmployeeId) -> Result<bool, EmployeePersistenceError>;

    async fn exists(&mut self, id: EmployeeId) -> Result<bool, EmployeePersistenceError>;

    /// Whether any row other than `exclude_id` holds `email`.
    async fn email_exists(
        &mut self,
        email: &str,
        exclude_id: Option<EmployeeId>,
    ) -> Result<bool, EmployeePersistenceError>;
}

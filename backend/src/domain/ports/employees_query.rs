//! Driving port for employee reads.
//!
//! Inbound adapters use this port to fetch employee views without importing
//! persistence concerns. Absence is reported through `Option` and `bool`
//! rather than errors.

use async_trait::async_trait;

use crate::domain::{EmployeeDto, EmployeeId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesQuery: Send + Sync {
    /// Every employee, ordered by last name then first name.
    async fn get_all(&self) -> Result<Vec<EmployeeDto>, Error>;

    async fn get_by_id(&self, id: EmployeeId) -> Result<Option<EmployeeDto>, Error>;

    /// Case-insensitive lookup.
    async fn get_by_email(&self, email: &str) -> Result<Option<EmployeeDto>, Error>;

    /// Case-insensitive department match, same ordering as [`Self::get_all`].
    async fn get_by_department(&self, department: &str) -> Result<Vec<EmployeeDto>, Error>;

    async fn get_active(&self) -> Result<Vec<EmployeeDto>, Error>;

    async fn exists(&self, id: EmployeeId) -> Result<bool, Error>;

    async fn email_exists(&self, email: &str, exclude_id: Option<EmployeeId>)
    -> Result<bool, Error>;
}

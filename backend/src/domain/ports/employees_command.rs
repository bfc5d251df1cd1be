//! Driving port for employee mutations.
//!
//! Operations addressing a missing employee return `None` or `false`. Email
//! collisions surface as [`crate::domain::ErrorCode::Conflict`]; entity rule
//! violations as [`crate::domain::ErrorCode::InvalidRequest`].

use async_trait::async_trait;

use crate::domain::{
    CreateEmployeeDto, EmployeeDto, EmployeeId, Error, PromoteEmployeeDto, TransferEmployeeDto,
    UpdateContactDto, UpdateEmployeeDto, UpdateSalaryDto,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesCommand: Send + Sync {
    async fn create(&self, request: CreateEmployeeDto) -> Result<EmployeeDto, Error>;

    /// Full-field replacement; the creation timestamp is preserved.
    async fn update(
        &self,
        id: EmployeeId,
        request: UpdateEmployeeDto,
    ) -> Result<Option<EmployeeDto>, Error>;

    async fn delete(&self, id: EmployeeId) -> Result<bool, Error>;

    async fn deactivate(&self, id: EmployeeId) -> Result<bool, Error>;

    async fn activate(&self, id: EmployeeId) -> Result<bool, Error>;

    async fn promote(
        &self,
        id: EmployeeId,
        request: PromoteEmployeeDto,
    ) -> Result<Option<EmployeeDto>, Error>;

    async fn transfer_department(
        &self,
        id: EmployeeId,
        request: TransferEmployeeDto,
    ) -> Result<Option<EmployeeDto>, Error>;

    async fn update_contact(
        &self,
        id: EmployeeId,
        request: UpdateContactDto,
    ) -> Result<Option<EmployeeDto>, Error>;

    async fn update_salary(
        &self,
        id: EmployeeId,
        request: UpdateSalaryDto,
    ) -> Result<Option<EmployeeDto>, Error>;
}

//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the employee aggregate, the transfer shapes exchanged with
//! adapters, and the application service that coordinates persistence
//! through the ports in [`ports`]. Nothing here depends on HTTP or on a
//! concrete store.
//!
//! Public surface:
//! - Employee (alias to `employee::Employee`): the persisted record.
//! - EmployeeService: implements the driving ports over a unit of work.
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.

pub mod employee;
pub mod employee_dto;
pub mod employee_service;
pub mod error;
pub mod ports;
pub mod validation;

pub use self::employee::{Employee, EmployeeId, EmployeeProfile, EmployeeValidationError};
pub use self::employee_dto::{
    CreateEmployeeDto, EmployeeDto, PromoteEmployeeDto, TransferEmployeeDto, UnpersistedEmployee,
    UpdateContactDto, UpdateEmployeeDto, UpdateSalaryDto,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::validation::Violation;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use roster::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Employee with ID 9 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! Employee application service.
//!
//! Implements the employee driving ports on top of a [`UnitOfWorkFactory`].
//! Every public operation opens its own unit of work; mutations run inside
//! an explicit transaction that is committed once, and any early return drops
//! the unit of work, which rolls the transaction back. Email uniqueness is
//! the only rule enforced here; entity rules live on [`Employee`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    EmployeePersistenceError, EmployeesCommand, EmployeesQuery, UnitOfWork, UnitOfWorkFactory,
};
use crate::domain::{
    CreateEmployeeDto, Employee, EmployeeDto, EmployeeId, EmployeeValidationError, Error,
    PromoteEmployeeDto, TransferEmployeeDto, UpdateContactDto, UpdateEmployeeDto,
    UpdateSalaryDto,
};

/// Employee service implementing [`EmployeesQuery`] and [`EmployeesCommand`].
#[derive(Clone)]
pub struct EmployeeService<F> {
    uow_factory: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<F> EmployeeService<F> {
    /// Create a new service over the given unit-of-work factory and clock.
    pub fn new(uow_factory: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self { uow_factory, clock }
    }
}

fn map_persistence_error(err: EmployeePersistenceError) -> Error {
    match err {
        EmployeePersistenceError::NotFound { id } => {
            warn!(employee_id = id, "employee vanished during the operation");
            Error::not_found(format!("Employee with ID {id} not found"))
        }
        EmployeePersistenceError::ConcurrencyConflict { message } => {
            warn!(reason = %message, "employee write lost a concurrency check");
            Error::conflict(message).with_details(json!({ "Code": "concurrency_conflict" }))
        }
        EmployeePersistenceError::PersistenceFailure { message } => {
            error!(reason = %message, "employee store rejected a write");
            Error::internal(format!("employee store error: {message}"))
        }
        EmployeePersistenceError::InvalidOperation { message } => {
            error!(reason = %message, "invalid unit of work usage");
            Error::internal(format!("employee store misuse: {message}"))
        }
        EmployeePersistenceError::Connection { message } => {
            error!(reason = %message, "employee store unavailable");
            Error::service_unavailable(format!("employee store unavailable: {message}"))
        }
    }
}

fn map_validation_error(err: EmployeeValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "Code": err.code() }))
}

fn email_conflict(email: &str) -> Error {
    Error::conflict(format!("Employee with email {email} already exists"))
        .with_details(json!({ "Field": "Email", "Code": "email_exists" }))
}

/// Only stored employees reach callers, and the store always assigns ids.
fn to_dto(employee: &Employee) -> Result<EmployeeDto, Error> {
    EmployeeDto::try_from(employee).map_err(|err| {
        error!(error = %err, "employee left the store without an identifier");
        Error::internal(err.to_string())
    })
}

fn to_dtos(employees: &[Employee]) -> Result<Vec<EmployeeDto>, Error> {
    employees.iter().map(to_dto).collect()
}

fn to_optional_dto(employee: Option<Employee>) -> Result<Option<EmployeeDto>, Error> {
    employee.as_ref().map(to_dto).transpose()
}

impl<F> EmployeeService<F>
where
    F: UnitOfWorkFactory,
{
    async fn open(&self) -> Result<Box<dyn UnitOfWork>, Error> {
        self.uow_factory.open().await.map_err(map_persistence_error)
    }

    async fn open_transaction(&self) -> Result<Box<dyn UnitOfWork>, Error> {
        let mut uow = self.open().await?;
        uow.begin_transaction()
            .await
            .map_err(map_persistence_error)?;
        Ok(uow)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Load one employee, apply `change`, and commit.
    ///
    /// Returns `None` when the employee does not exist. When `email` is given
    /// it must not belong to any other employee.
    async fn modify<C>(
        &self,
        id: EmployeeId,
        operation: &'static str,
        email: Option<&str>,
        change: C,
    ) -> Result<Option<Employee>, Error>
    where
        C: FnOnce(&mut Employee, DateTime<Utc>) -> Result<(), Error> + Send,
    {
        info!(employee_id = %id, operation, "modifying employee");
        let mut uow = self.open_transaction().await?;
        let Some(mut employee) = uow
            .employees()
            .get_by_id(id)
            .await
            .map_err(map_persistence_error)?
        else {
            warn!(employee_id = %id, operation, "employee not found");
            return Ok(None);
        };

        if let Some(email) = email {
            let taken = uow
                .employees()
                .email_exists(email, Some(id))
                .await
                .map_err(map_persistence_error)?;
            if taken {
                warn!(employee_id = %id, operation, "email already in use");
                return Err(email_conflict(email));
            }
        }

        change(&mut employee, self.now())?;
        let saved = uow
            .employees()
            .update(employee)
            .await
            .map_err(map_persistence_error)?;
        uow.commit_transaction()
            .await
            .map_err(map_persistence_error)?;
        info!(employee_id = %id, operation, "employee modified");
        Ok(Some(saved))
    }
}

#[async_trait]
impl<F> EmployeesQuery for EmployeeService<F>
where
    F: UnitOfWorkFactory,
{
    async fn get_all(&self) -> Result<Vec<EmployeeDto>, Error> {
        let mut uow = self.open().await?;
        let employees = uow
            .employees()
            .get_all()
            .await
            .map_err(map_persistence_error)?;
        info!(count = employees.len(), "listed employees");
        to_dtos(&employees)
    }

    async fn get_by_id(&self, id: EmployeeId) -> Result<Option<EmployeeDto>, Error> {
        let mut uow = self.open().await?;
        let employee = uow
            .employees()
            .get_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if employee.is_none() {
            warn!(employee_id = %id, "employee not found");
        }
        to_optional_dto(employee)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<EmployeeDto>, Error> {
        let mut uow = self.open().await?;
        let employee = uow
            .employees()
            .get_by_email(email)
            .await
            .map_err(map_persistence_error)?;
        to_optional_dto(employee)
    }

    async fn get_by_department(&self, department: &str) -> Result<Vec<EmployeeDto>, Error> {
        let mut uow = self.open().await?;
        let employees = uow
            .employees()
            .get_by_department(department)
            .await
            .map_err(map_persistence_error)?;
        to_dtos(&employees)
    }

    async fn get_active(&self) -> Result<Vec<EmployeeDto>, Error> {
        let mut uow = self.open().await?;
        let employees = uow
            .employees()
            .get_active()
            .await
            .map_err(map_persistence_error)?;
        to_dtos(&employees)
    }

    async fn exists(&self, id: EmployeeId) -> Result<bool, Error> {
        let mut uow = self.open().await?;
        uow.employees()
            .exists(id)
            .await
            .map_err(map_persistence_error)
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<EmployeeId>,
    ) -> Result<bool, Error> {
        let mut uow = self.open().await?;
        uow.employees()
            .email_exists(email, exclude_id)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<F> EmployeesCommand for EmployeeService<F>
where
    F: UnitOfWorkFactory,
{
    async fn create(&self, request: CreateEmployeeDto) -> Result<EmployeeDto, Error> {
        info!(department = %request.department, "creating employee");
        let mut uow = self.open_transaction().await?;
        let taken = uow
            .employees()
            .email_exists(&request.email, None)
            .await
            .map_err(map_persistence_error)?;
        if taken {
            warn!("rejected employee with duplicate email");
            return Err(email_conflict(&request.email));
        }

        let employee = Employee::new(request.into_profile(), self.now());
        let created = uow
            .employees()
            .add(employee)
            .await
            .map_err(map_persistence_error)?;
        let dto = to_dto(&created)?;
        uow.commit_transaction()
            .await
            .map_err(map_persistence_error)?;
        info!(employee_id = dto.id, "employee created");
        Ok(dto)
    }

    async fn update(
        &self,
        id: EmployeeId,
        request: UpdateEmployeeDto,
    ) -> Result<Option<EmployeeDto>, Error> {
        let email = request.email.clone();
        let (profile, is_active) = request.into_parts();
        let updated = self
            .modify(id, "update", Some(&email), move |employee, now| {
                employee.apply_update(profile, is_active, now);
                Ok(())
            })
            .await?;
        to_optional_dto(updated)
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, Error> {
        info!(employee_id = %id, "deleting employee");
        let mut uow = self.open_transaction().await?;
        let removed = uow
            .employees()
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if !removed {
            warn!(employee_id = %id, "employee not found");
            return Ok(false);
        }
        uow.commit_transaction()
            .await
            .map_err(map_persistence_error)?;
        info!(employee_id = %id, "employee deleted");
        Ok(true)
    }

    async fn deactivate(&self, id: EmployeeId) -> Result<bool, Error> {
        let modified = self
            .modify(id, "deactivate", None, |employee, now| {
                employee.deactivate(now);
                Ok(())
            })
            .await?;
        Ok(modified.is_some())
    }

    async fn activate(&self, id: EmployeeId) -> Result<bool, Error> {
        let modified = self
            .modify(id, "activate", None, |employee, now| {
                employee.activate(now);
                Ok(())
            })
            .await?;
        Ok(modified.is_some())
    }

    async fn promote(
        &self,
        id: EmployeeId,
        request: PromoteEmployeeDto,
    ) -> Result<Option<EmployeeDto>, Error> {
        let PromoteEmployeeDto { position, salary } = request;
        let promoted = self
            .modify(id, "promote", None, move |employee, now| {
                employee
                    .promote(position, salary, now)
                    .map_err(map_validation_error)
            })
            .await?;
        to_optional_dto(promoted)
    }

    async fn transfer_department(
        &self,
        id: EmployeeId,
        request: TransferEmployeeDto,
    ) -> Result<Option<EmployeeDto>, Error> {
        let TransferEmployeeDto { department } = request;
        let transferred = self
            .modify(id, "transfer_department", None, move |employee, now| {
                employee
                    .transfer_department(department, now)
                    .map_err(map_validation_error)
            })
            .await?;
        to_optional_dto(transferred)
    }

    async fn update_contact(
        &self,
        id: EmployeeId,
        request: UpdateContactDto,
    ) -> Result<Option<EmployeeDto>, Error> {
        let UpdateContactDto {
            phone_number,
            email,
        } = request;
        let lookup = email.clone();
        let updated = self
            .modify(id, "update_contact", Some(&lookup), move |employee, now| {
                employee
                    .update_contact(phone_number, email, now)
                    .map_err(map_validation_error)
            })
            .await?;
        to_optional_dto(updated)
    }

    async fn update_salary(
        &self,
        id: EmployeeId,
        request: UpdateSalaryDto,
    ) -> Result<Option<EmployeeDto>, Error> {
        let UpdateSalaryDto { salary } = request;
        let updated = self
            .modify(id, "update_salary", None, move |employee, now| {
                employee
                    .update_salary(salary, now)
                    .map_err(map_validation_error)
            })
            .await?;
        to_optional_dto(updated)
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;

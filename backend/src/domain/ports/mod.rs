//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`EmployeesQuery`], [`EmployeesCommand`]) are implemented
//! by the domain service and consumed by inbound adapters. Driven ports
//! ([`UnitOfWorkFactory`], [`UnitOfWork`], [`EmployeeRepository`]) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_repository;
mod employees_command;
mod employees_query;
mod unit_of_work;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{
    CONCURRENCY_CONFLICT_MESSAGE, EmployeePersistenceError, EmployeeRepository,
};
pub use employees_command::EmployeesCommand;
#[cfg(test)]
pub use employees_command::MockEmployeesCommand;
pub use employees_query::EmployeesQuery;
#[cfg(test)]
pub use employees_query::MockEmployeesQuery;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};

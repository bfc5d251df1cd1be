//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{EmployeesCommand, EmployeesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees_query: Arc<dyn EmployeesQuery>,
    pub employees_command: Arc<dyn EmployeesCommand>,
    /// Source of "today" for hire-date validation.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use roster::domain::EmployeeService;
    /// use roster::inbound::http::state::HttpState;
    /// use roster::outbound::memory::InMemoryUnitOfWorkFactory;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let service = Arc::new(EmployeeService::new(
    ///     Arc::new(InMemoryUnitOfWorkFactory::default()),
    ///     clock.clone(),
    /// ));
    /// let state = HttpState::new(service.clone(), service, clock);
    /// # let _ = state;
    /// ```
    pub fn new(
        employees_query: Arc<dyn EmployeesQuery>,
        employees_command: Arc<dyn EmployeesCommand>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            employees_query,
            employees_command,
            clock,
        }
    }
}

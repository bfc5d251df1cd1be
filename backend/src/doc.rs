//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every employee endpoint, the health probes, the
//! service information endpoint, and the payload schemas they exchange. The
//! generated document backs Swagger UI (debug builds) and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    CreateEmployeeDto, EmployeeDto, Error, ErrorCode, PromoteEmployeeDto, TransferEmployeeDto,
    UpdateContactDto, UpdateEmployeeDto, UpdateSalaryDto, Violation,
};
use crate::inbound::http::info::ServiceInfo;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster employee API",
        description = "Create, read, update and deactivate employee records.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::list_active_employees,
        crate::inbound::http::employees::get_employee_by_email,
        crate::inbound::http::employees::list_employees_by_department,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::head_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::employees::deactivate_employee,
        crate::inbound::http::employees::activate_employee,
        crate::inbound::http::employees::promote_employee,
        crate::inbound::http::employees::transfer_employee,
        crate::inbound::http::employees::update_employee_contact,
        crate::inbound::http::employees::update_employee_salary,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::info::service_info,
    ),
    components(schemas(
        EmployeeDto,
        CreateEmployeeDto,
        UpdateEmployeeDto,
        PromoteEmployeeDto,
        TransferEmployeeDto,
        UpdateContactDto,
        UpdateSalaryDto,
        Violation,
        Error,
        ErrorCode,
        ServiceInfo,
    )),
    tags(
        (name = "employees", description = "Employee record management"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "info", description = "Service metadata")
    )
)]
pub struct ApiDoc;

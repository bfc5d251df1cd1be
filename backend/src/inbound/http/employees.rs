//! Employee HTTP handlers.
//!
//! ```text
//! GET    /api/employees
//! GET    /api/employees/active
//! GET    /api/employees/email/{email}
//! GET    /api/employees/department/{department}
//! GET    /api/employees/{id}
//! HEAD   /api/employees/{id}
//! POST   /api/employees
//! PUT    /api/employees/{id}
//! DELETE /api/employees/{id}
//! PATCH  /api/employees/{id}/{deactivate,activate,promote,transfer,contact,salary}
//! ```
//!
//! Handlers validate payloads, call the employee ports held in
//! [`HttpState`], and map absent employees to 404.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, head, patch, post, put, web};

use crate::domain::validation::{
    validate_contact, validate_create, validate_promotion, validate_salary, validate_transfer,
    validate_update,
};
use crate::domain::{
    CreateEmployeeDto, EmployeeDto, EmployeeId, Error, PromoteEmployeeDto, TransferEmployeeDto,
    UpdateContactDto, UpdateEmployeeDto, UpdateSalaryDto,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ensure_valid, json_config, parse_id, path_config, require_non_blank,
};

const EMPLOYEES_PATH: &str = "/api/employees";

fn employee_not_found(id: EmployeeId) -> Error {
    Error::not_found(format!("Employee with ID {id} not found"))
}

fn found_or_404(id: EmployeeId, employee: Option<EmployeeDto>) -> ApiResult<web::Json<EmployeeDto>> {
    employee.map(web::Json).ok_or_else(|| employee_not_found(id))
}

fn no_content_or_404(id: EmployeeId, applied: bool) -> ApiResult<HttpResponse> {
    if applied {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(employee_not_found(id))
    }
}

/// Register every employee route on a `/api` scope, together with the
/// extractor configuration that reports malformed input as 400.
///
/// Literal segments (`active`, `email`, `department`) are registered before
/// `{id}` so they are never parsed as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use roster::inbound::http::employees;
///
/// let app = App::new().service(web::scope("/api").configure(employees::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(list_employees)
        .service(list_active_employees)
        .service(get_employee_by_email)
        .service(list_employees_by_department)
        .service(get_employee)
        .service(head_employee)
        .service(create_employee)
        .service(update_employee)
        .service(delete_employee)
        .service(deactivate_employee)
        .service(activate_employee)
        .service(promote_employee)
        .service(transfer_employee)
        .service(update_employee_contact)
        .service(update_employee_salary);
}

/// List every employee ordered by last name then first name.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employees", body = [EmployeeDto]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<EmployeeDto>>> {
    Ok(web::Json(state.employees_query.get_all().await?))
}

/// List active employees.
#[utoipa::path(
    get,
    path = "/api/employees/active",
    responses(
        (status = 200, description = "Active employees", body = [EmployeeDto]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listActiveEmployees"
)]
#[get("/employees/active")]
pub async fn list_active_employees(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmployeeDto>>> {
    Ok(web::Json(state.employees_query.get_active().await?))
}

/// Look an employee up by email, ignoring case.
#[utoipa::path(
    get,
    path = "/api/employees/email/{email}",
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "Employee", body = EmployeeDto),
        (status = 400, description = "Blank email", body = Error),
        (status = 404, description = "No employee with that email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "getEmployeeByEmail"
)]
#[get("/employees/email/{email}")]
pub async fn get_employee_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let email = path.into_inner();
    require_non_blank(&email, FieldName::new("Email"), "Email")?;
    state
        .employees_query
        .get_by_email(&email)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("Employee with email {email} not found")))
}

/// List employees of one department, ignoring case.
#[utoipa::path(
    get,
    path = "/api/employees/department/{department}",
    params(("department" = String, Path, description = "Department name")),
    responses(
        (status = 200, description = "Employees in the department", body = [EmployeeDto]),
        (status = 400, description = "Blank department", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployeesByDepartment"
)]
#[get("/employees/department/{department}")]
pub async fn list_employees_by_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<EmployeeDto>>> {
    let department = path.into_inner();
    require_non_blank(&department, FieldName::new("Department"), "Department")?;
    Ok(web::Json(
        state.employees_query.get_by_department(&department).await?,
    ))
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee", body = EmployeeDto),
        (status = 400, description = "Invalid employee ID", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let id = parse_id(path.into_inner())?;
    found_or_404(id, state.employees_query.get_by_id(id).await?)
}

/// Check whether an employee exists without returning it.
#[utoipa::path(
    head,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee exists"),
        (status = 400, description = "Invalid employee ID"),
        (status = 404, description = "Employee not found")
    ),
    tags = ["employees"],
    operation_id = "headEmployee"
)]
#[head("/employees/{id}")]
pub async fn head_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    if state.employees_query.exists(id).await? {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(employee_not_found(id))
    }
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeDto,
    responses(
        (
            status = 201,
            description = "Employee created",
            headers(("Location" = String, description = "URL of the new employee")),
            body = EmployeeDto
        ),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEmployeeDto>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    ensure_valid(validate_create(&request, state.clock.utc().date_naive()))?;
    let created = state.employees_command.create(request).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{EMPLOYEES_PATH}/{}", created.id)))
        .json(created))
}

/// Replace every client-supplied field of an employee.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee identifier")),
    request_body = UpdateEmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeDto),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateEmployeeDto>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let id = parse_id(path.into_inner())?;
    let request = payload.into_inner();
    ensure_valid(validate_update(&request, state.clock.utc().date_naive()))?;
    found_or_404(id, state.employees_command.update(id, request).await?)
}

/// Remove an employee.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 400, description = "Invalid employee ID", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    no_content_or_404(id, state.employees_command.delete(id).await?)
}

/// Mark an employee inactive.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/deactivate",
    params(("id" = i32, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Employee deactivated"),
        (status = 400, description = "Invalid employee ID", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deactivateEmployee"
)]
#[patch("/employees/{id}/deactivate")]
pub async fn deactivate_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    no_content_or_404(id, state.employees_command.deactivate(id).await?)
}

/// Mark an employee active.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/activate",
    params(("id" = i32, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Employee activated"),
        (status = 400, description = "Invalid employee ID", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "activateEmployee"
)]
#[patch("/employees/{id}/activate")]
pub async fn activate_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    no_content_or_404(id, state.employees_command.activate(id).await?)
}

/// Move an employee to a new position; salary may not decrease.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/promote",
    params(("id" = i32, Path, description = "Employee identifier")),
    request_body = PromoteEmployeeDto,
    responses(
        (status = 200, description = "Employee promoted", body = EmployeeDto),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "promoteEmployee"
)]
#[patch("/employees/{id}/promote")]
pub async fn promote_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<PromoteEmployeeDto>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let id = parse_id(path.into_inner())?;
    let request = payload.into_inner();
    ensure_valid(validate_promotion(&request))?;
    found_or_404(id, state.employees_command.promote(id, request).await?)
}

/// Transfer an employee to another department.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/transfer",
    params(("id" = i32, Path, description = "Employee identifier")),
    request_body = TransferEmployeeDto,
    responses(
        (status = 200, description = "Employee transferred", body = EmployeeDto),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "transferEmployee"
)]
#[patch("/employees/{id}/transfer")]
pub async fn transfer_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<TransferEmployeeDto>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let id = parse_id(path.into_inner())?;
    let request = payload.into_inner();
    ensure_valid(validate_transfer(&request))?;
    found_or_404(
        id,
        state.employees_command.transfer_department(id, request).await?,
    )
}

/// Replace an employee's email and phone number.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/contact",
    params(("id" = i32, Path, description = "Employee identifier")),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Contact details updated", body = EmployeeDto),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployeeContact"
)]
#[patch("/employees/{id}/contact")]
pub async fn update_employee_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateContactDto>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let id = parse_id(path.into_inner())?;
    let request = payload.into_inner();
    ensure_valid(validate_contact(&request))?;
    found_or_404(id, state.employees_command.update_contact(id, request).await?)
}

/// Set an employee's salary.
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/salary",
    params(("id" = i32, Path, description = "Employee identifier")),
    request_body = UpdateSalaryDto,
    responses(
        (status = 200, description = "Salary updated", body = EmployeeDto),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployeeSalary"
)]
#[patch("/employees/{id}/salary")]
pub async fn update_employee_salary(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateSalaryDto>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let id = parse_id(path.into_inner())?;
    let request = payload.into_inner();
    ensure_valid(validate_salary(&request))?;
    found_or_404(id, state.employees_command.update_salary(id, request).await?)
}

#[cfg(test)]
mod tests;

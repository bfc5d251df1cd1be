//! Request payload validation.
//!
//! Each inbound shape has one function returning every violated rule as a
//! `(field, message)` pair. An empty list means the payload may be handed to
//! the service. Validation never touches the store; uniqueness is enforced
//! by the service.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use super::employee_dto::{
    CreateEmployeeDto, PromoteEmployeeDto, TransferEmployeeDto, UpdateContactDto,
    UpdateEmployeeDto, UpdateSalaryDto,
};

/// Departments an employee may belong to; matched case-insensitively.
pub const DEPARTMENTS: [&str; 9] = [
    "Engineering",
    "Human Resources",
    "Finance",
    "Marketing",
    "Sales",
    "Operations",
    "IT",
    "Legal",
    "Customer Service",
];

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const PHONE_MAX: usize = 20;
const DEPARTMENT_MAX: usize = 100;
const POSITION_MAX: usize = 100;

/// A single failed rule. `field` names the offending JSON property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Violation {
    #[schema(example = "Email")]
    pub field: &'static str,
    #[schema(example = "Please provide a valid email address")]
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A pattern compiled on first use.
///
/// A pattern that fails to compile is logged once and matches nothing, so
/// the affected rule rejects its input instead of aborting the request.
struct Pattern {
    source: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl Pattern {
    const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    fn regex(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| match Regex::new(self.source) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    error!(
                        pattern = self.source,
                        error = %error,
                        "validation pattern failed to compile"
                    );
                    None
                }
            })
            .as_ref()
    }

    fn is_match(&self, value: &str) -> bool {
        self.regex().is_some_and(|regex| regex.is_match(value))
    }
}

static NAME_PATTERN: Pattern = Pattern::new(r"^[a-zA-Z\s]+$");
/// One `@` with a non-empty local part and host; `user@host` is accepted.
static EMAIL_PATTERN: Pattern = Pattern::new(r"^[^@\s]+@[^@\s]+$");
static PHONE_PATTERN: Pattern = Pattern::new(r"^[\+]?[0-9\s\-\(\)]+$");

/// Salaries must stay strictly below this amount.
fn salary_ceiling() -> Decimal {
    Decimal::new(10_000_000, 0)
}

/// Hire dates must fall strictly after this day.
fn earliest_hire_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

struct Rules {
    violations: Vec<Violation>,
}

impl Rules {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation::new(field, message));
    }

    fn person_name(&mut self, field: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, format!("{label} is required"));
            return;
        }
        if too_long(value, NAME_MAX) {
            self.push(field, format!("{label} cannot exceed {NAME_MAX} characters"));
        }
        if !NAME_PATTERN.is_match(value) {
            self.push(field, format!("{label} can only contain letters and spaces"));
        }
    }

    fn email(&mut self, value: &str) {
        if value.trim().is_empty() {
            self.push("Email", "Email is required");
            return;
        }
        if !EMAIL_PATTERN.is_match(value) {
            self.push("Email", "Please provide a valid email address");
        }
        if too_long(value, EMAIL_MAX) {
            self.push("Email", format!("Email cannot exceed {EMAIL_MAX} characters"));
        }
    }

    fn phone(&mut self, value: Option<&str>) {
        let Some(phone) = value.filter(|phone| !phone.is_empty()) else {
            return;
        };
        if too_long(phone, PHONE_MAX) {
            self.push(
                "PhoneNumber",
                format!("Phone number cannot exceed {PHONE_MAX} characters"),
            );
        }
        if !PHONE_PATTERN.is_match(phone) {
            self.push("PhoneNumber", "Invalid phone number format");
        }
    }

    fn department(&mut self, value: &str) {
        if value.trim().is_empty() {
            self.push("Department", "Department is required");
            return;
        }
        if too_long(value, DEPARTMENT_MAX) {
            self.push(
                "Department",
                format!("Department cannot exceed {DEPARTMENT_MAX} characters"),
            );
        }
        if !is_known_department(value) {
            self.push("Department", "Please select a valid department");
        }
    }

    fn position(&mut self, value: &str) {
        if value.trim().is_empty() {
            self.push("Position", "Position is required");
            return;
        }
        if too_long(value, POSITION_MAX) {
            self.push(
                "Position",
                format!("Position cannot exceed {POSITION_MAX} characters"),
            );
        }
    }

    fn salary(&mut self, value: Decimal) {
        if value <= Decimal::ZERO {
            self.push("Salary", "Salary must be greater than 0");
        } else if value >= salary_ceiling() {
            self.push("Salary", "Salary seems unrealistic");
        }
    }

    fn hire_date(&mut self, value: NaiveDate, today: NaiveDate) {
        if value > today {
            self.push("HireDate", "Hire date cannot be in the future");
        }
        if value <= earliest_hire_date() {
            self.push("HireDate", "Hire date must be after 1900");
        }
    }

    fn finish(self) -> Vec<Violation> {
        self.violations
    }
}

/// Case-insensitive membership test against [`DEPARTMENTS`].
pub fn is_known_department(value: &str) -> bool {
    DEPARTMENTS
        .iter()
        .any(|department| department.eq_ignore_ascii_case(value))
}

/// Validate a creation payload. `today` bounds the hire date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use roster::domain::CreateEmployeeDto;
/// use roster::domain::validation::validate_create;
///
/// let dto = CreateEmployeeDto {
///     first_name: "Ada".into(),
///     last_name: "Lovelace".into(),
///     email: "ada@company.com".into(),
///     phone_number: None,
///     department: "engineering".into(),
///     position: "Engineer".into(),
///     salary: Decimal::new(90_000, 0),
///     hire_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
/// };
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
/// assert!(validate_create(&dto, today).is_empty());
/// ```
pub fn validate_create(dto: &CreateEmployeeDto, today: NaiveDate) -> Vec<Violation> {
    let mut rules = Rules::new();
    rules.person_name("FirstName", "First name", &dto.first_name);
    rules.person_name("LastName", "Last name", &dto.last_name);
    rules.email(&dto.email);
    rules.phone(dto.phone_number.as_deref());
    rules.department(&dto.department);
    rules.position(&dto.position);
    rules.salary(dto.salary);
    rules.hire_date(dto.hire_date, today);
    rules.finish()
}

/// Validate a full-field replacement payload; same rules as creation.
pub fn validate_update(dto: &UpdateEmployeeDto, today: NaiveDate) -> Vec<Violation> {
    let mut rules = Rules::new();
    rules.person_name("FirstName", "First name", &dto.first_name);
    rules.person_name("LastName", "Last name", &dto.last_name);
    rules.email(&dto.email);
    rules.phone(dto.phone_number.as_deref());
    rules.department(&dto.department);
    rules.position(&dto.position);
    rules.salary(dto.salary);
    rules.hire_date(dto.hire_date, today);
    rules.finish()
}

pub fn validate_promotion(dto: &PromoteEmployeeDto) -> Vec<Violation> {
    let mut rules = Rules::new();
    rules.position(&dto.position);
    rules.salary(dto.salary);
    rules.finish()
}

pub fn validate_transfer(dto: &TransferEmployeeDto) -> Vec<Violation> {
    let mut rules = Rules::new();
    rules.department(&dto.department);
    rules.finish()
}

pub fn validate_contact(dto: &UpdateContactDto) -> Vec<Violation> {
    let mut rules = Rules::new();
    rules.email(&dto.email);
    rules.phone(dto.phone_number.as_deref());
    rules.finish()
}

pub fn validate_salary(dto: &UpdateSalaryDto) -> Vec<Violation> {
    let mut rules = Rules::new();
    rules.salary(dto.salary);
    rules.finish()
}

#[cfg(test)]
mod tests;

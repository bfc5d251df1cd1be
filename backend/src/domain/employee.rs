//! Employee aggregate.
//!
//! The entity owns its invariants: every named business operation validates
//! its input, mutates in place, and stamps `updated_at`. Neither the
//! identifier (once assigned by the store) nor `created_at` is ever changed
//! by a mutation.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Precondition violations raised by [`Employee`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    /// Identifiers are store-assigned positive integers.
    #[error("employee id must be a positive integer, got {value}")]
    InvalidId { value: i32 },
    /// Salaries cannot drop below zero.
    #[error("salary cannot be negative")]
    NegativeSalary,
    /// Contact updates must carry an email address.
    #[error("email cannot be empty")]
    EmptyEmail,
    /// Promotions must name the new position.
    #[error("position cannot be empty")]
    EmptyPosition,
    /// Transfers must name the target department.
    #[error("department cannot be empty")]
    EmptyDepartment,
    /// Promotions never lower pay.
    #[error("new salary cannot be less than current salary of {current}")]
    SalaryDecrease { current: Decimal },
}

impl EmployeeValidationError {
    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "invalid_id",
            Self::NegativeSalary => "negative_salary",
            Self::EmptyEmail => "empty_email",
            Self::EmptyPosition => "empty_position",
            Self::EmptyDepartment => "empty_department",
            Self::SalaryDecrease { .. } => "salary_decrease",
        }
    }
}

/// Store-assigned employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct EmployeeId(i32);

impl EmployeeId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::EmployeeId;
    ///
    /// assert_eq!(EmployeeId::new(7).expect("positive id").get(), 7);
    /// assert!(EmployeeId::new(0).is_err());
    /// ```
    pub fn new(value: i32) -> Result<Self, EmployeeValidationError> {
        if value <= 0 {
            return Err(EmployeeValidationError::InvalidId { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmployeeId> for i32 {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for EmployeeId {
    type Error = EmployeeValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Client-supplied employee attributes.
///
/// This is the field set shared by creation and full-field replacement. It
/// deliberately excludes the identifier, the active flag and timestamps,
/// which are owned by the store and the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
}

/// Persisted employee record.
///
/// ## Invariants
/// - `id` is `None` until the repository assigns one and never changes after.
/// - `created_at` is fixed at construction.
/// - `updated_at` is refreshed by every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: Option<EmployeeId>,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: Option<String>,
    department: String,
    position: String,
    salary: Decimal,
    hire_date: NaiveDate,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Build a new, not yet persisted, active employee.
    pub fn new(profile: EmployeeProfile, created_at: DateTime<Utc>) -> Self {
        let EmployeeProfile {
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
        } = profile;
        Self {
            id: None,
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
            is_active: true,
            created_at,
            updated_at: None,
        }
    }

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn hire_date(&self) -> NaiveDate {
        self.hire_date
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Case-insensitive email comparison used for uniqueness checks.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.touch(now);
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.touch(now);
    }

    /// Set a new salary; only negative values are rejected.
    pub fn update_salary(
        &mut self,
        new_salary: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), EmployeeValidationError> {
        if new_salary < Decimal::ZERO {
            return Err(EmployeeValidationError::NegativeSalary);
        }
        self.salary = new_salary;
        self.touch(now);
        Ok(())
    }

    /// Replace the phone number and email address.
    pub fn update_contact(
        &mut self,
        phone_number: Option<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), EmployeeValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyEmail);
        }
        self.phone_number = phone_number;
        self.email = email;
        self.touch(now);
        Ok(())
    }

    /// Move to a new position; the salary may stay level but never drop.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use rust_decimal::Decimal;
    /// use roster::domain::{Employee, EmployeeProfile};
    ///
    /// let mut employee = Employee::new(
    ///     EmployeeProfile {
    ///         first_name: "Ada".into(),
    ///         last_name: "Lovelace".into(),
    ///         email: "ada@example.com".into(),
    ///         phone_number: None,
    ///         department: "Engineering".into(),
    ///         position: "Engineer".into(),
    ///         salary: Decimal::new(50_000, 0),
    ///         hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).expect("valid date"),
    ///     },
    ///     Utc::now(),
    /// );
    /// assert!(employee.promote("Lead", Decimal::new(40_000, 0), Utc::now()).is_err());
    /// employee
    ///     .promote("Lead", Decimal::new(60_000, 0), Utc::now())
    ///     .expect("raise accepted");
    /// assert_eq!(employee.position(), "Lead");
    /// ```
    pub fn promote(
        &mut self,
        new_position: impl Into<String>,
        new_salary: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), EmployeeValidationError> {
        let new_position = new_position.into();
        if new_position.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyPosition);
        }
        if new_salary < self.salary {
            return Err(EmployeeValidationError::SalaryDecrease {
                current: self.salary,
            });
        }
        self.position = new_position;
        self.salary = new_salary;
        self.touch(now);
        Ok(())
    }

    pub fn transfer_department(
        &mut self,
        new_department: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), EmployeeValidationError> {
        let new_department = new_department.into();
        if new_department.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyDepartment);
        }
        self.department = new_department;
        self.touch(now);
        Ok(())
    }

    /// Full-field replacement. Identifier and `created_at` are preserved.
    pub fn apply_update(&mut self, profile: EmployeeProfile, is_active: bool, now: DateTime<Utc>) {
        let EmployeeProfile {
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
        } = profile;
        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.phone_number = phone_number;
        self.department = department;
        self.position = position;
        self.salary = salary;
        self.hire_date = hire_date;
        self.is_active = is_active;
        self.touch(now);
    }

    /// Assign the store identifier. Already-identified entities are left alone.
    pub(crate) fn assign_id(&mut self, id: EmployeeId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Restore the creation stamp held by the store before overwriting a row.
    pub(crate) fn keep_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

//! Transfer shapes crossing the service boundary.
//!
//! Request DTOs carry only client-supplied fields; the identifier, active
//! flag on creation, and timestamps are server-assigned. [`EmployeeDto`] is
//! the outbound view, including the derived `FullName`.
//!
//! Property names are PascalCase on the wire. `HireDate` is rendered as a
//! midnight date-time (`2022-03-15T00:00:00`) and accepted either in that
//! form or as a plain date.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::employee::{Employee, EmployeeProfile};

pub mod hire_date_format {
    //! Serde adapter for `HireDate`.

    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const RENDERED: &str = "%Y-%m-%dT00:00:00";

    /// Parse a plain date, a naive date-time or an RFC 3339 timestamp.
    /// Any time of day is dropped.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use roster::domain::employee_dto::hire_date_format::parse;
    ///
    /// let expected = NaiveDate::from_ymd_opt(2022, 3, 15);
    /// assert_eq!(parse("2022-03-15"), expected);
    /// assert_eq!(parse("2022-03-15T00:00:00"), expected);
    /// assert_eq!(parse("15/03/2022"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|moment| moment.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|moment| moment.date_naive())
            })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(RENDERED))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid hire date `{raw}`, expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"
            ))
        })
    }
}

/// Raised when mapping an employee the store has not assigned an id to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("employee has no identifier; only stored employees can be mapped")]
pub struct UnpersistedEmployee;

/// Outbound view of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Bill")]
    pub first_name: String,
    #[schema(example = "Kishore")]
    pub last_name: String,
    #[schema(example = "Bill Kishore")]
    pub full_name: String,
    #[schema(example = "bill.kishore@company.com")]
    pub email: String,
    #[schema(example = "+91-9876543210")]
    pub phone_number: Option<String>,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Senior Software Engineer")]
    pub position: String,
    #[schema(value_type = String, example = "95000.00")]
    pub salary: Decimal,
    #[serde(with = "hire_date_format")]
    #[schema(value_type = String, example = "2022-03-15T00:00:00")]
    pub hire_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<&Employee> for EmployeeDto {
    type Error = UnpersistedEmployee;

    fn try_from(employee: &Employee) -> Result<Self, Self::Error> {
        let id = employee.id().ok_or(UnpersistedEmployee)?;
        Ok(Self {
            id: i32::from(id),
            first_name: employee.first_name().to_owned(),
            last_name: employee.last_name().to_owned(),
            full_name: employee.full_name(),
            email: employee.email().to_owned(),
            phone_number: employee.phone_number().map(str::to_owned),
            department: employee.department().to_owned(),
            position: employee.position().to_owned(),
            salary: employee.salary(),
            hire_date: employee.hire_date(),
            is_active: employee.is_active(),
            created_at: employee.created_at(),
            updated_at: employee.updated_at(),
        })
    }
}

/// Payload for `POST /api/employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CreateEmployeeDto {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada.lovelace@company.com")]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Software Engineer")]
    pub position: String,
    #[schema(value_type = String, example = "85000")]
    pub salary: Decimal,
    #[serde(with = "hire_date_format")]
    #[schema(value_type = String, example = "2024-02-01T00:00:00")]
    pub hire_date: NaiveDate,
}

impl CreateEmployeeDto {
    pub fn into_profile(self) -> EmployeeProfile {
        let Self {
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
        } = self;
        EmployeeProfile {
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Payload for `PUT /api/employees/{id}`: full-field replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateEmployeeDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub department: String,
    pub position: String,
    #[schema(value_type = String, example = "85000")]
    pub salary: Decimal,
    #[serde(with = "hire_date_format")]
    #[schema(value_type = String, example = "2024-02-01T00:00:00")]
    pub hire_date: NaiveDate,
    /// Defaults to `true` when omitted.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl UpdateEmployeeDto {
    /// Split into the replaceable profile and the requested active flag.
    pub fn into_parts(self) -> (EmployeeProfile, bool) {
        let Self {
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
            is_active,
        } = self;
        let profile = EmployeeProfile {
            first_name,
            last_name,
            email,
            phone_number,
            department,
            position,
            salary,
            hire_date,
        };
        (profile, is_active)
    }
}

impl From<EmployeeDto> for UpdateEmployeeDto {
    fn from(dto: EmployeeDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone_number: dto.phone_number,
            department: dto.department,
            position: dto.position,
            salary: dto.salary,
            hire_date: dto.hire_date,
            is_active: dto.is_active,
        }
    }
}

/// Payload for `PATCH /api/employees/{id}/promote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PromoteEmployeeDto {
    #[schema(example = "Principal Engineer")]
    pub position: String,
    #[schema(value_type = String, example = "120000")]
    pub salary: Decimal,
}

/// Payload for `PATCH /api/employees/{id}/transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct TransferEmployeeDto {
    #[schema(example = "Finance")]
    pub department: String,
}

/// Payload for `PATCH /api/employees/{id}/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateContactDto {
    #[serde(default)]
    pub phone_number: Option<String>,
    pub email: String,
}

/// Payload for `PATCH /api/employees/{id}/salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSalaryDto {
    #[schema(value_type = String, example = "99000")]
    pub salary: Decimal,
}

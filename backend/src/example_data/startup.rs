//! Startup seeding of the reference employees.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{EmployeesCommand, EmployeesQuery};
use crate::domain::{CreateEmployeeDto, Error};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// A hard-coded reference record is malformed.
    #[error("invalid reference employee: {0}")]
    InvalidFixture(String),
    /// The service rejected a reference record.
    #[error("example data seeding error: {0}")]
    Seeding(#[from] Error),
}

struct ReferenceEmployee {
    first_name: &'static str,
    last_name: &'static str,
    phone_number: &'static str,
    department: &'static str,
    position: &'static str,
    salary: i64,
    hired: (i32, u32, u32),
}

const REFERENCE_EMPLOYEES: [ReferenceEmployee; 3] = [
    ReferenceEmployee {
        first_name: "Bill",
        last_name: "Kishore",
        phone_number: "+91-9876543210",
        department: "Engineering",
        position: "Senior Software Engineer",
        salary: 95_000,
        hired: (2022, 3, 15),
    },
    ReferenceEmployee {
        first_name: "Kishore",
        last_name: "Kumar",
        phone_number: "+91-9876543211",
        department: "Marketing",
        position: "Marketing Manager",
        salary: 75_000,
        hired: (2021, 8, 20),
    },
    ReferenceEmployee {
        first_name: "Manoj",
        last_name: "Sharma",
        phone_number: "+91-9876543212",
        department: "Finance",
        position: "Financial Analyst",
        salary: 65_000,
        hired: (2023, 1, 10),
    },
];

impl ReferenceEmployee {
    fn to_request(&self) -> Result<CreateEmployeeDto, StartupSeedingError> {
        let (year, month, day) = self.hired;
        let hire_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            StartupSeedingError::InvalidFixture(format!(
                "{} {} has invalid hire date {year}-{month}-{day}",
                self.first_name, self.last_name
            ))
        })?;
        Ok(CreateEmployeeDto {
            first_name: self.first_name.to_owned(),
            last_name: self.last_name.to_owned(),
            email: format!("{}.{}@company.com", self.first_name, self.last_name).to_lowercase(),
            phone_number: Some(self.phone_number.to_owned()),
            department: self.department.to_owned(),
            position: self.position.to_owned(),
            salary: Decimal::new(self.salary, 0),
            hire_date,
        })
    }
}

/// Creation payloads for the three reference employees.
///
/// # Examples
/// ```
/// use roster::example_data::reference_employees;
///
/// let employees = reference_employees().expect("reference data is valid");
/// assert_eq!(employees[0].email, "bill.kishore@company.com");
/// ```
pub fn reference_employees() -> Result<Vec<CreateEmployeeDto>, StartupSeedingError> {
    REFERENCE_EMPLOYEES
        .iter()
        .map(ReferenceEmployee::to_request)
        .collect()
}

/// Create the reference employees when `enabled`.
///
/// Employees whose email is already taken are skipped, so the call is safe
/// to repeat. Returns how many employees were created, or `None` when
/// seeding is disabled.
pub async fn seed_example_data_on_startup(
    enabled: bool,
    query: &dyn EmployeesQuery,
    command: &dyn EmployeesCommand,
) -> Result<Option<usize>, StartupSeedingError> {
    if !enabled {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let mut created = 0;
    for request in reference_employees()? {
        if query.email_exists(&request.email, None).await? {
            info!(email = %request.email, "reference employee already present; skipping");
            continue;
        }
        let employee = command.create(request).await?;
        info!(employee_id = employee.id, "reference employee seeded");
        created += 1;
    }

    info!(created, "example data seeding applied");
    Ok(Some(created))
}

//! Test utilities for the roster crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

pub mod clock {
    //! Deterministic clock doubles.

    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    /// A clock that stands still until a test moves it.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        pub fn set(&self, now: DateTime<Utc>) {
            *self.lock_clock() = now;
        }

        fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod fixtures {
    //! Reference employee payloads.

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::CreateEmployeeDto;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None => panic!("invalid fixture date {year}-{month}-{day}"),
        }
    }

    /// Build a valid creation payload; emails derive from the names.
    pub fn create_request(first: &str, last: &str, department: &str) -> CreateEmployeeDto {
        CreateEmployeeDto {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: format!("{first}.{last}@company.com").to_lowercase(),
            phone_number: None,
            department: department.to_owned(),
            position: "Analyst".to_owned(),
            salary: Decimal::new(60_000, 0),
            hire_date: date(2022, 4, 1),
        }
    }
}

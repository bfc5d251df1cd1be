//! Startup wiring for example data seeding.

mod startup;

pub use startup::{StartupSeedingError, reference_employees, seed_example_data_on_startup};

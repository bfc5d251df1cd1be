//! HTTP inbound adapter exposing REST endpoints.

pub mod employees;
pub mod error;
pub mod health;
pub mod info;
pub mod state;
pub mod validation;

pub use error::ApiResult;

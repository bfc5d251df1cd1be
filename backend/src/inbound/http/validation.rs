//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, non-numeric path segments) and payload
//! rule violations are all reported as `invalid_request` errors so clients
//! see one error envelope.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{EmployeeId, Error, Violation};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    MissingParameter,
    InvalidBody,
    ValidationFailed,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::MissingParameter => "missing_parameter",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::ValidationFailed => "validation_failed",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_id_error(value: impl Into<String>) -> Error {
    Error::invalid_request("Invalid employee ID").with_details(json!({
        "Field": "Id",
        "Value": value.into(),
        "Code": ErrorCode::InvalidId.as_str(),
    }))
}

/// Turn a raw path identifier into an [`EmployeeId`], rejecting `id <= 0`.
pub(crate) fn parse_id(raw: i32) -> Result<EmployeeId, Error> {
    EmployeeId::new(raw).map_err(|_| invalid_id_error(raw.to_string()))
}

/// Reject blank path parameters such as an empty email or department.
pub(crate) fn require_non_blank(value: &str, field: FieldName, label: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        let field = field.as_str();
        return Err(
            Error::invalid_request(format!("{label} is required")).with_details(json!({
                "Field": field,
                "Code": ErrorCode::MissingParameter.as_str(),
            })),
        );
    }
    Ok(())
}

/// Fail with every violation at once when the list is non-empty.
pub(crate) fn ensure_valid(violations: Vec<Violation>) -> Result<(), Error> {
    if violations.is_empty() {
        return Ok(());
    }
    Err(Error::invalid_request("Validation failed").with_details(json!({
        "Code": ErrorCode::ValidationFailed.as_str(),
        "Violations": violations,
    })))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid request body: {err}"))
        .with_details(json!({ "Code": ErrorCode::InvalidBody.as_str() }))
        .into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let value = match &err {
        PathError::Deserialize(inner) => inner.to_string(),
        _ => String::new(),
    };
    invalid_id_error(value).into()
}

/// JSON extractor configuration mapping body errors to the domain envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration mapping malformed identifiers to 400.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

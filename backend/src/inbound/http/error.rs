//! HTTP rendering of domain errors.
//!
//! Every failure leaves the API as the same JSON envelope. What the client
//! sees depends on the error class:
//!
//! - client errors (`400`, `404`, `409`) are returned as raised, details
//!   included;
//! - `503` keeps its message but loses its details, which describe the
//!   backing store;
//! - `500` is replaced by a generic message; only the trace id survives so
//!   operators can find the logged cause.
//!
//! Error responses are never cached and always echo the trace id header.

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error, warn};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message shown to clients in place of any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your request";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn keep_trace_id(mut replacement: Error, original: &Error) -> Error {
    if let Some(id) = original.trace_id() {
        replacement = replacement.with_trace_id(id.to_owned());
    }
    replacement
}

/// The envelope actually sent for `error`.
fn client_view(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => keep_trace_id(Error::internal(INTERNAL_ERROR_MESSAGE), error),
        ErrorCode::ServiceUnavailable => {
            keep_trace_id(Error::service_unavailable(error.message()), error)
        }
        _ => error.clone(),
    }
}

fn log_outgoing(error: &Error) {
    let trace_id = error.trace_id().unwrap_or("-");
    match error.code() {
        ErrorCode::InternalError => {
            error!(
                reason = %error.message(),
                details = ?error.details(),
                trace_id,
                "request failed"
            );
        }
        ErrorCode::ServiceUnavailable => {
            warn!(reason = %error.message(), trace_id, "employee store unavailable");
        }
        code => debug!(?code, reason = %error.message(), trace_id, "request rejected"),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_outgoing(self);

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(CacheControl(vec![CacheDirective::NoStore]));
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self))
    }
}

/// Fold framework errors into the envelope.
///
/// Client-class failures become `invalid_request` with the framework's
/// status-line reason; anything else is an internal error.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        if status.is_client_error() {
            let reason = status.canonical_reason().unwrap_or("Bad Request");
            debug!(error = %err, %status, "framework rejected request");
            return Error::invalid_request(reason);
        }
        error!(error = %err, %status, "framework error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests;

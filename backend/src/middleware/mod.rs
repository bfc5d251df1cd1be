//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as tracing, cross-origin access and response hardening.

pub mod trace;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;

pub use trace::Trace;

/// Response headers hardening browsers against content sniffing, framing and
/// reflected scripts.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
}

/// Cross-origin policy: any origin, method and header.
///
/// The origin is answered with `*` rather than echoed, so credentials are
/// never shared. Response headers such as `Location` and `trace-id` are
/// exposed to browser clients.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .expose_any_header()
        .max_age(3600)
}

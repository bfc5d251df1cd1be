//! Employee records service.
//!
//! A layered CRUD backend: domain entities and services behind ports, an
//! in-memory transactional store, and an Actix HTTP adapter.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;

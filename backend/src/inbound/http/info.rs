//! Service information endpoint.
//!
//! ```text
//! GET /
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

/// Response payload for `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceInfo {
    #[schema(example = "Welcome to the Roster employee API")]
    pub message: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// `debug` or `release`.
    #[schema(example = "debug")]
    pub environment: String,
    pub timestamp: DateTime<Utc>,
    /// Swagger UI location; only served by debug builds.
    #[schema(example = "/docs")]
    pub docs: String,
    #[schema(example = "/health")]
    pub health_check: String,
}

fn environment() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

/// Describe the running service.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service information", body = ServiceInfo)),
    tags = ["info"],
    operation_id = "getServiceInfo"
)]
#[get("/")]
pub async fn service_info(state: web::Data<HttpState>) -> web::Json<ServiceInfo> {
    web::Json(ServiceInfo {
        message: "Welcome to the Roster employee API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        environment: environment().to_owned(),
        timestamp: state.clock.utc(),
        docs: "/docs".to_owned(),
        health_check: "/health".to_owned(),
    })
}

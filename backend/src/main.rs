//! Roster entry-point: loads settings, wires the employee service over the
//! in-memory store, seeds reference data unless disabled, and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::domain::EmployeeService;
use roster::example_data::seed_example_data_on_startup;
use roster::inbound::http::health::HealthState;
use roster::inbound::http::state::HttpState;
use roster::outbound::memory::{InMemoryEmployeeStore, InMemoryUnitOfWorkFactory};
use server::{ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid bind address: {e}"),
        )
    })?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let uow_factory = Arc::new(InMemoryUnitOfWorkFactory::new(InMemoryEmployeeStore::new()));
    let service = Arc::new(EmployeeService::new(uow_factory, Arc::clone(&clock)));

    seed_example_data_on_startup(
        settings.seed_example_data,
        service.as_ref(),
        service.as_ref(),
    )
    .await
    .map_err(std::io::Error::other)?;

    let http_state = web::Data::new(HttpState::new(service.clone(), service, clock));
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, bind_addr)?;
    info!(%bind_addr, "roster listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

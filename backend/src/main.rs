//! Training tracker entry-point: loads settings, builds the storage backend
//! and serves the REST API with health probes and OpenAPI docs.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, StorageBackend, build_storage_backend, create_server};
use training_tracker::inbound::http::health::HealthState;
use training_tracker::settings::AppSettings;


/// Build Prometheus middleware, logging and continuing without it on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "metrics initialisation failed; /metrics disabled");
            None
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load configuration: {err}")))?;
    let resolved = settings.resolve()?;

    let StorageBackend {
        http_state,
        storage_probe,
    } = build_storage_backend(&resolved.persistence).await?;
    let health_state = web::Data::new(HealthState::new(storage_probe, Arc::new(DefaultClock)));

    let config =
        ServerConfig::new(resolved.bind_addr).with_error_details(resolved.expose_error_details);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("training_tracker")
            .endpoint("/metrics")
            .build()
    }));

    info!(
        bind_addr = %config.bind_addr(),
        expose_error_details = resolved.expose_error_details,
        "starting HTTP server"
    );
    let server = create_server(health_state.clone(), http_state, config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

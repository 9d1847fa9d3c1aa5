//! Health endpoints: liveness & readiness probes for orchestration and load balancers.
//! Document endpoints in OpenAPI via Utoipa.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{StorageProbe, StorageStatus};

/// Version reported by the probes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared health state for readiness and liveness checks.
/// Track readiness and whether the process should report itself as alive to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    started_at: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    storage: Arc<dyn StorageProbe>,
}

impl HealthState {
    /// Create a new health state starting as not ready but live. Uptime is
    /// measured from this call.
    pub fn new(storage: Arc<dyn StorageProbe>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            started_at: clock.utc(),
            clock,
            storage,
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn snapshot(&self) -> (DateTime<Utc>, i64) {
        let now = self.clock.utc();
        (now, (now - self.started_at).num_seconds().max(0))
    }

    fn probe_response<T: Serialize>(probe_ok: bool, body: &T) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(body)
    }
}

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` while alive, `unhealthy` once draining.
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub timestamp_utc: DateTime<Utc>,
    pub uptime_seconds: i64,
}

/// Dependency states reported by readiness.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Dependencies {
    /// `null` when the backend has no database, otherwise `up` or `down`.
    #[schema(example = "up")]
    pub database: Option<String>,
}

/// Readiness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    /// `ok` or `degraded`.
    #[schema(example = "ok")]
    pub status: String,
    pub version: String,
    pub timestamp_utc: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub dependencies: Dependencies,
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before graceful shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive", body = HealthResponse),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is shutting down", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let alive = state.is_alive();
    let (now, uptime) = state.snapshot();
    let body = HealthResponse {
        status: if alive { "ok" } else { "unhealthy" }.to_owned(),
        version: VERSION.to_owned(),
        timestamp_utc: now,
        uptime_seconds: uptime,
    };
    HealthState::probe_response(alive, &body)
}

/// Readiness probe. Return 200 when start-up has completed and the database
/// (if any) answers; return 503 with `degraded` otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ReadinessResponse),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is not ready", body = ReadinessResponse)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let storage = state.storage.check().await;
    if let StorageStatus::Down { message } = &storage {
        warn!(%message, "readiness probe: database unreachable");
    }
    let ok = state.is_ready() && !storage.is_down();
    let (now, uptime) = state.snapshot();
    let body = ReadinessResponse {
        status: if ok { "ok" } else { "degraded" }.to_owned(),
        version: VERSION.to_owned(),
        timestamp_utc: now,
        uptime_seconds: uptime,
        dependencies: Dependencies {
            database: storage.label().map(str::to_owned),
        },
    };
    HealthState::probe_response(ok, &body)
}

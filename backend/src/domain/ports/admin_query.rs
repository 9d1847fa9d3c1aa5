//! Driving port for administrative reporting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Aggregate counts shown on the admin dashboard.
///
/// Totals come from repository counts; the per-flag and per-status tallies
/// are computed over a bounded sample of each collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatistics {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub total_courses: u64,
    pub required_courses: u64,
    pub optional_courses: u64,
    pub total_enrollments: u64,
    pub pending_enrollments: u64,
    pub active_enrollments: u64,
    pub completed_enrollments: u64,
    pub cancelled_enrollments: u64,
    /// Percentage of enrollments completed, rounded to one decimal place.
    pub completion_rate: f64,
}

/// Component health label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

/// Admin view of API and data store health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub api_status: ComponentStatus,
    pub database_status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Driving port for admin reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminQuery: Send + Sync {
    async fn statistics(&self) -> Result<SystemStatistics, Error>;

    /// Probe the data store with a cheap read. Failures are reported in the
    /// payload rather than returned as errors.
    async fn system_health(&self) -> SystemHealth;
}

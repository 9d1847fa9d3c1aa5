//! Driving port for administrative bulk operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Request to set the active flag on many users at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUserStatusRequest {
    pub user_ids: Vec<UserId>,
    pub is_active: bool,
}

/// Per-request tally of a bulk update. Individual failures never abort the
/// remaining updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateOutcome {
    pub total_requested: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<String>,
}

impl BulkUpdateOutcome {
    pub fn new(total_requested: usize) -> Self {
        Self {
            total_requested,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, message: String) {
        self.failed_count += 1;
        self.errors.push(message);
    }
}

/// Driving port for admin writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCommand: Send + Sync {
    async fn bulk_update_user_status(&self, request: BulkUserStatusRequest) -> BulkUpdateOutcome;
}

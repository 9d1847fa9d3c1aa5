//! Port for checking whether the backing store is reachable.
//!
//! Readiness probes use it to decide between `ok` and `degraded`.

use async_trait::async_trait;

/// Outcome of a storage connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageStatus {
    /// The active backend has no external dependency to check.
    NotApplicable,
    /// The database answered.
    Up,
    /// The database could not be reached.
    Down { message: String },
}

impl StorageStatus {
    /// Whether the status should fail readiness.
    pub fn is_down(&self) -> bool {
        matches!(self, Self::Down { .. })
    }

    /// Wire label used in readiness payloads; `None` when not applicable.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::NotApplicable => None,
            Self::Up => Some("up"),
            Self::Down { .. } => Some("down"),
        }
    }
}

/// Connectivity check against the configured persistence backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn check(&self) -> StorageStatus;
}

//! Readiness probe for in-memory storage.

use async_trait::async_trait;

use crate::domain::ports::{StorageProbe, StorageStatus};

/// In-memory storage has no external dependency, so there is nothing to
/// check.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStorageProbe;

#[async_trait]
impl StorageProbe for MemoryStorageProbe {
    async fn check(&self) -> StorageStatus {
        StorageStatus::NotApplicable
    }
}

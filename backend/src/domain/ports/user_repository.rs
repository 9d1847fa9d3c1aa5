//! Port abstraction for user persistence adapters.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
        /// A storage-level uniqueness constraint rejected the write.
        Duplicate => "user repository rejected duplicate: {message}",
    }
}

/// Port for reading and writing user records.
///
/// Lists are ordered by email so pages are deterministic across adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return one page of users and the total number of users.
    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a user, assigning an identity and creation time when absent.
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Replace a stored user. Returns `None` when the id is unknown.
    async fn update(&self, user: &User) -> Result<Option<User>, UserRepositoryError>;

    /// Delete a user. Returns `false` when the id is unknown.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;

    /// Whether any user other than `exclude` already uses `email`.
    async fn exists_by_email(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<bool, UserRepositoryError>;
}

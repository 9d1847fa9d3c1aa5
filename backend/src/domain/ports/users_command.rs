//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

use super::UserDetail;

/// Request to register a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub profile: UserProfile,
}

/// Request to replace a user's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub user_id: UserId,
    pub profile: UserProfile,
}

/// Driving port for user writes.
///
/// Email uniqueness is checked before every write; a clash yields
/// `Conflict`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserDetail, Error>;

    async fn update_user(&self, request: UpdateUserRequest) -> Result<UserDetail, Error>;

    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}

//! Driving port for user read operations and the user projections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, UserId};

/// Reduced user projection returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_utc: DateTime<Utc>,
}

/// Full user projection; adds the stored name parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_utc: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            full_name: user.name().full_name(),
            is_active: user.is_active(),
            created_utc: user.created_at(),
        }
    }
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            full_name: user.name().full_name(),
            first_name: user.name().first_name().to_owned(),
            last_name: user.name().last_name().to_owned(),
            is_active: user.is_active(),
            created_utc: user.created_at(),
        }
    }
}

/// Driving port for user reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// List users ordered by email.
    async fn list_users(&self, page: PageRequest) -> Result<Paginated<UserSummary>, Error>;

    /// Fetch one user; `NotFound` when the id is unknown.
    async fn get_user(&self, id: UserId) -> Result<UserDetail, Error>;
}

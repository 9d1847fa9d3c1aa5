//! In-memory [`UserRepository`].

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::{lock, sorted_page};

/// User store ordered by email on list.
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    clock: Arc<dyn Clock>,
}

impl MemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            clock,
        }
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, UserRepositoryError> {
        lock(&self.users, "user", UserRepositoryError::query)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), UserRepositoryError> {
        let users = self.users()?;
        Ok(sorted_page(&users, page, |left, right| {
            left.email().cmp(right.email())
        }))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users()?.iter().find(|user| user.id() == *id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let created = user.into_user(self.clock.utc());
        self.users()?.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserRepositoryError> {
        let mut users = self.users()?;
        Ok(users
            .iter_mut()
            .find(|stored| stored.id() == user.id())
            .map(|stored| {
                *stored = user.clone();
                user.clone()
            }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut users = self.users()?;
        let before = users.len();
        users.retain(|user| user.id() != *id);
        Ok(users.len() != before)
    }

    async fn exists_by_email(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<bool, UserRepositoryError> {
        Ok(self
            .users()?
            .iter()
            .any(|user| user.email() == email && Some(user.id()) != exclude))
    }
}

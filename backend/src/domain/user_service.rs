//! User domain service.
//!
//! Implements [`UsersQuery`] and [`UsersCommand`] over a [`UserRepository`],
//! enforcing email uniqueness on every write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{
    CreateUserRequest, UpdateUserRequest, UserDetail, UserRepository, UserRepositoryError,
    UserSummary, UsersCommand, UsersQuery,
};
use crate::domain::{EmailAddress, Error, NewUser, UserId};

/// User service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

pub(crate) fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_repository_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::Duplicate { message } => {
                Error::conflict(format!("user already exists: {message}"))
            }
        }
    }

    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<(), Error> {
        let taken = self
            .repo
            .exists_by_email(email, exclude)
            .await
            .map_err(Self::map_repository_error)?;
        if taken {
            return Err(Error::conflict(format!(
                "A user with the email '{email}' already exists."
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, page: PageRequest) -> Result<Paginated<UserSummary>, Error> {
        let (users, total) = self
            .repo
            .list(page)
            .await
            .map_err(Self::map_repository_error)?;
        let items = users.iter().map(UserSummary::from).collect();
        Ok(Paginated::new(items, page, total))
    }

    async fn get_user(&self, id: UserId) -> Result<UserDetail, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(Self::map_repository_error)?
            .map(|user| UserDetail::from(&user))
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserDetail, Error> {
        self.ensure_email_available(&request.profile.email, None)
            .await?;
        let draft = NewUser {
            created_at: Some(self.clock.utc()),
            ..NewUser::new(request.profile)
        };
        let user = self
            .repo
            .create(draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(UserDetail::from(&user))
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<UserDetail, Error> {
        let UpdateUserRequest { user_id, profile } = request;
        let existing = self
            .repo
            .find_by_id(&user_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        self.ensure_email_available(&profile.email, Some(user_id))
            .await?;
        let updated = existing.with_profile(profile);
        let stored = self
            .repo
            .update(&updated)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        Ok(UserDetail::from(&stored))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(&id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;

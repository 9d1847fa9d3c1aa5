//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, NewUser, PersonName, User, UserId, UserProfile};

use super::diesel_error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const KINDS: ErrorKinds<UserRepositoryError> = ErrorKinds {
    connection: UserRepositoryError::connection,
    query: UserRepositoryError::query,
    duplicate: UserRepositoryError::duplicate,
};

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, &KINDS)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(error, &KINDS)
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserRepositoryError::query(format!("stored user {}: {err}", row.id)))?;
    let profile = UserProfile {
        email,
        name: PersonName::from_parts(row.first_name, row.last_name),
        is_active: row.is_active,
    };
    Ok(User::new(UserId::from_uuid(row.id), profile, row.created_at))
}

fn changeset(user: &User) -> UserChangeset<'_> {
    UserChangeset {
        email: user.email().as_str(),
        first_name: user.name().first_name(),
        last_name: user.name().last_name(),
        is_active: user.is_active(),
    }
}

/// Insert record for a draft; a missing id is generated here.
fn insert_row(user: &NewUser) -> NewUserRow<'_> {
    let id = user.id.unwrap_or_else(UserId::random);
    NewUserRow {
        id: *id.as_uuid(),
        email: user.profile.email.as_str(),
        first_name: user.profile.name.first_name(),
        last_name: user.profile.name.last_name(),
        is_active: user.profile.is_active,
        created_at: user.created_at,
    }
}

/// Diesel implementation of [`UserRepository`], ordered by email.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::email.asc())
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let items = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, u64::try_from(total).unwrap_or_default()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = insert_row(&user);
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_user(stored)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(users::table.find(user.id().as_uuid()))
            .set(&changeset(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn exists_by_email(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = users::table
            .filter(users::email.eq(email.as_str()))
            .into_boxed();
        if let Some(excluded) = exclude {
            query = query.filter(users::id.ne(*excluded.as_uuid()));
        }
        let matches: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(matches > 0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::test_support::{fixture_timestamp, profile};

    fn row(email: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            first_name: "Alice".to_owned(),
            last_name: "Example".to_owned(),
            is_active: false,
            created_at: fixture_timestamp(),
        }
    }

    #[rstest]
    fn row_converts_to_user() {
        let source = row("alice@example.com");
        let id = source.id;

        let user = row_to_user(source).expect("valid row");

        assert_eq!(*user.id().as_uuid(), id);
        assert_eq!(user.name().full_name(), "Alice Example");
        assert!(!user.is_active());
        assert_eq!(user.created_at(), fixture_timestamp());
    }

    #[rstest]
    fn invalid_stored_email_is_a_query_error() {
        let error = row_to_user(row("not-an-email")).expect_err("invalid row");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn changeset_mirrors_profile() {
        let user = row_to_user(row("alice@example.com")).expect("valid row");
        let set = changeset(&user);
        assert_eq!(set.email, "alice@example.com");
        assert_eq!(set.first_name, "Alice");
        assert_eq!(set.last_name, "Example");
        assert!(!set.is_active);
    }

    #[rstest]
    fn insert_row_splits_name_and_keeps_draft_id() {
        let id = UserId::random();
        let draft = NewUser {
            id: Some(id),
            profile: profile("ada@example.com", "Ada King Lovelace"),
            created_at: None,
        };

        let row = insert_row(&draft);

        assert_eq!(row.id, *id.as_uuid());
        assert_eq!(row.email, "ada@example.com");
        assert_eq!(row.first_name, "Ada");
        assert_eq!(row.last_name, "King Lovelace");
        assert!(row.is_active);
        assert!(row.created_at.is_none());
    }
}

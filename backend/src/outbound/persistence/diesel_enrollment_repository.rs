//! PostgreSQL-backed [`EnrollmentRepository`].
//!
//! The `(course_id, user_id)` unique index turns a racing duplicate insert
//! into [`EnrollmentRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{
    CourseId, Enrollment, EnrollmentDraft, EnrollmentId, EnrollmentStatus, NewEnrollment, UserId,
};

use super::diesel_error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::{EnrollmentRow, EnrollmentStatusChangeset, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::enrollments;

const KINDS: ErrorKinds<EnrollmentRepositoryError> = ErrorKinds {
    connection: EnrollmentRepositoryError::connection,
    query: EnrollmentRepositoryError::query,
    duplicate: EnrollmentRepositoryError::duplicate,
};

fn pool_error(error: PoolError) -> EnrollmentRepositoryError {
    map_pool_error(error, &KINDS)
}

fn diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    map_diesel_error(error, &KINDS)
}

fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    let status = row.status.parse::<EnrollmentStatus>().map_err(|err| {
        EnrollmentRepositoryError::query(format!("stored enrollment {}: {err}", row.id))
    })?;
    Ok(Enrollment::from(EnrollmentDraft {
        id: EnrollmentId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        course_id: CourseId::from_uuid(row.course_id),
        status,
        enrolled_at: row.enrolled_at,
        completed_at: row.completed_at,
    }))
}

/// Diesel implementation of [`EnrollmentRepository`], ordered by id.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Enrollment>, u64), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = enrollments::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<EnrollmentRow> = enrollments::table
            .order(enrollments::id.asc())
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let items = rows
            .into_iter()
            .map(row_to_enrollment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, u64::try_from(total).unwrap_or_default()))
    }

    async fn find_by_id(
        &self,
        id: &EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        enrollments::table
            .find(id.as_uuid())
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_enrollment)
            .transpose()
    }

    async fn find_by_user_and_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        enrollments::table
            .filter(enrollments::user_id.eq(user_id.as_uuid()))
            .filter(enrollments::course_id.eq(course_id.as_uuid()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_enrollment)
            .transpose()
    }

    async fn create(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = enrollment.id.unwrap_or_else(EnrollmentId::random);
        let row = NewEnrollmentRow {
            id: *id.as_uuid(),
            user_id: *enrollment.user_id.as_uuid(),
            course_id: *enrollment.course_id.as_uuid(),
            status: enrollment.status.as_str(),
            enrolled_at: enrollment.enrolled_at,
        };
        let stored: EnrollmentRow = diesel::insert_into(enrollments::table)
            .values(&row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_enrollment(stored)
    }

    async fn update(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = EnrollmentStatusChangeset {
            status: enrollment.status().as_str(),
            completed_at: enrollment.completed_at(),
        };
        diesel::update(enrollments::table.find(enrollment.id().as_uuid()))
            .set(&changes)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_enrollment)
            .transpose()
    }

    async fn delete(&self, id: &EnrollmentId) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(enrollments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::test_support::fixture_timestamp;

    fn row(status: &str) -> EnrollmentRow {
        EnrollmentRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            status: status.to_owned(),
            enrolled_at: fixture_timestamp(),
            completed_at: None,
        }
    }

    #[rstest]
    #[case("PENDING", EnrollmentStatus::Pending)]
    #[case("COMPLETED", EnrollmentStatus::Completed)]
    fn row_status_parses(#[case] stored: &str, #[case] expected: EnrollmentStatus) {
        let enrollment = row_to_enrollment(row(stored)).expect("valid row");
        assert_eq!(enrollment.status(), expected);
    }

    #[rstest]
    fn unknown_status_is_a_query_error() {
        let error = row_to_enrollment(row("pending")).expect_err("invalid row");
        assert!(matches!(error, EnrollmentRepositoryError::Query { .. }));
    }
}

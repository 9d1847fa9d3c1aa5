//! PostgreSQL-backed [`CourseRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{
    Course, CourseDetails, CourseDetailsDraft, CourseId, CourseTitle, NewCourse,
};

use super::diesel_error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::{CourseChangeset, CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

const KINDS: ErrorKinds<CourseRepositoryError> = ErrorKinds {
    connection: CourseRepositoryError::connection,
    query: CourseRepositoryError::query,
    duplicate: CourseRepositoryError::duplicate,
};

fn pool_error(error: PoolError) -> CourseRepositoryError {
    map_pool_error(error, &KINDS)
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(error, &KINDS)
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let CourseRow {
        id,
        title,
        is_required,
        is_active,
        validity_months,
        category,
        description,
        created_at,
    } = row;
    let details = CourseDetails::try_from(CourseDetailsDraft {
        title,
        is_required,
        is_active,
        validity_months: validity_months.map(i64::from),
        category,
        description,
    })
    .map_err(|err| CourseRepositoryError::query(format!("stored course {id}: {err}")))?;
    Ok(Course::new(CourseId::from_uuid(id), details, created_at))
}

// `ValidityMonths` is bounded to 1..=120, well inside `i16`.
fn validity_column(details: &CourseDetails) -> Option<i16> {
    details
        .validity_months
        .and_then(|months| i16::try_from(months.get()).ok())
}

fn changeset(details: &CourseDetails) -> CourseChangeset<'_> {
    CourseChangeset {
        title: details.title.as_str(),
        is_required: details.is_required,
        is_active: details.is_active,
        validity_months: validity_column(details),
        category: details.category.as_deref(),
        description: details.description.as_deref(),
    }
}

/// Diesel implementation of [`CourseRepository`], ordered by title.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<Course>, u64), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = courses::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<CourseRow> = courses::table
            .order(courses::title.asc())
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let items = rows
            .into_iter()
            .map(row_to_course)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, u64::try_from(total).unwrap_or_default()))
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_course)
            .transpose()
    }

    async fn create(&self, course: NewCourse) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = course.id.unwrap_or_else(CourseId::random);
        let details = &course.details;
        let row = NewCourseRow {
            id: *id.as_uuid(),
            title: details.title.as_str(),
            is_required: details.is_required,
            is_active: details.is_active,
            validity_months: validity_column(details),
            category: details.category.as_deref(),
            description: details.description.as_deref(),
            created_at: course.created_at,
        };
        let stored: CourseRow = diesel::insert_into(courses::table)
            .values(&row)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_course(stored)
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(courses::table.find(course.id().as_uuid()))
            .set(&changeset(course.details()))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_course)
            .transpose()
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(courses::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn exists_by_title(
        &self,
        title: &CourseTitle,
        exclude: Option<CourseId>,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = courses::table
            .filter(courses::title.eq(title.as_str()))
            .into_boxed();
        if let Some(excluded) = exclude {
            query = query.filter(courses::id.ne(*excluded.as_uuid()));
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
    use crate::test_support::{course_details, fixture_timestamp};

    fn row(validity_months: Option<i16>) -> CourseRow {
        CourseRow {
            id: Uuid::new_v4(),
            title: "Safety Orientation".to_owned(),
            is_required: true,
            is_active: true,
            validity_months,
            category: Some("Safety".to_owned()),
            description: None,
            created_at: fixture_timestamp(),
        }
    }

    #[rstest]
    #[case(Some(12), Some(12))]
    #[case(None, None)]
    fn row_converts_validity(#[case] stored: Option<i16>, #[case] expected: Option<u16>) {
        let course = row_to_course(row(stored)).expect("valid row");
        assert_eq!(course.validity_months().map(|months| months.get()), expected);
        assert_eq!(course.category(), Some("Safety"));
    }

    #[rstest]
    fn out_of_range_validity_is_a_query_error() {
        let error = row_to_course(row(Some(500))).expect_err("invalid row");
        assert!(matches!(error, CourseRepositoryError::Query { .. }));
    }

    #[rstest]
    fn changeset_clears_missing_optionals() {
        let mut details = course_details("Leadership Essentials", false);
        details.validity_months = None;
        details.category = None;

        let set = changeset(&details);

        assert_eq!(set.title, "Leadership Essentials");
        assert_eq!(set.validity_months, None);
        assert_eq!(set.category, None);
        assert!(!set.is_required);
    }
}

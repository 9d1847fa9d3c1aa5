//! Course domain service.
//!
//! Title uniqueness is checked before every write, excluding the course being
//! updated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{
    CourseDetail, CourseRepository, CourseRepositoryError, CourseSummary, CoursesCommand,
    CoursesQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::domain::{CourseId, CourseTitle, Error, NewCourse};

/// Course service implementing the course driving ports.
#[derive(Clone)]
pub struct CourseService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CourseService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

pub(crate) fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("course {id} not found"))
}

impl<R> CourseService<R>
where
    R: CourseRepository,
{
    fn map_repository_error(error: CourseRepositoryError) -> Error {
        match error {
            CourseRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("course repository unavailable: {message}"))
            }
            CourseRepositoryError::Query { message } => {
                Error::internal(format!("course repository error: {message}"))
            }
            CourseRepositoryError::Duplicate { message } => {
                Error::conflict(format!("course already exists: {message}"))
            }
        }
    }

    async fn ensure_title_available(
        &self,
        title: &CourseTitle,
        exclude: Option<CourseId>,
    ) -> Result<(), Error> {
        let taken = self
            .repo
            .exists_by_title(title, exclude)
            .await
            .map_err(Self::map_repository_error)?;
        if taken {
            return Err(Error::conflict(format!(
                "A course with the title '{title}' already exists."
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> CoursesQuery for CourseService<R>
where
    R: CourseRepository,
{
    async fn list_courses(&self, page: PageRequest) -> Result<Paginated<CourseSummary>, Error> {
        let (courses, total) = self
            .repo
            .list(page)
            .await
            .map_err(Self::map_repository_error)?;
        let items = courses.iter().map(CourseSummary::from).collect();
        Ok(Paginated::new(items, page, total))
    }

    async fn get_course(&self, id: CourseId) -> Result<CourseDetail, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(Self::map_repository_error)?
            .map(|course| CourseDetail::from(&course))
            .ok_or_else(|| course_not_found(id))
    }
}

#[async_trait]
impl<R> CoursesCommand for CourseService<R>
where
    R: CourseRepository,
{
    async fn create_course(&self, request: CreateCourseRequest) -> Result<CourseDetail, Error> {
        self.ensure_title_available(&request.details.title, None)
            .await?;
        let draft = NewCourse {
            created_at: Some(self.clock.utc()),
            ..NewCourse::new(request.details)
        };
        let course = self
            .repo
            .create(draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(course_id = %course.id(), title = %course.title(), "course created");
        Ok(CourseDetail::from(&course))
    }

    async fn update_course(&self, request: UpdateCourseRequest) -> Result<CourseDetail, Error> {
        let UpdateCourseRequest { course_id, details } = request;
        let existing = self
            .repo
            .find_by_id(&course_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| course_not_found(course_id))?;
        self.ensure_title_available(&details.title, Some(course_id))
            .await?;
        let stored = self
            .repo
            .update(&existing.with_details(details))
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| course_not_found(course_id))?;
        Ok(CourseDetail::from(&stored))
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), Error> {
        if !self
            .repo
            .delete(&id)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(course_not_found(id));
        }
        info!(course_id = %id, "course deleted");
        Ok(())
    }
}

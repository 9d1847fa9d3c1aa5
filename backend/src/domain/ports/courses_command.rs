//! Driving port for course mutations.

use async_trait::async_trait;

use crate::domain::{CourseDetails, CourseId, Error};

use super::CourseDetail;

/// Request to create a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCourseRequest {
    pub details: CourseDetails,
}

/// Request to replace a course's details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCourseRequest {
    pub course_id: CourseId,
    pub details: CourseDetails,
}

/// Driving port for course writes.
///
/// Title uniqueness is checked before every write; a clash yields
/// `Conflict`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesCommand: Send + Sync {
    async fn create_course(&self, request: CreateCourseRequest) -> Result<CourseDetail, Error>;

    async fn update_course(&self, request: UpdateCourseRequest) -> Result<CourseDetail, Error>;

    async fn delete_course(&self, id: CourseId) -> Result<(), Error>;
}

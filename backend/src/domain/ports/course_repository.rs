//! Port abstraction for course persistence adapters.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Course, CourseId, CourseTitle, NewCourse};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "course repository query failed: {message}",
        /// A storage-level uniqueness constraint rejected the write.
        Duplicate => "course repository rejected duplicate: {message}",
    }
}

/// Port for reading and writing course records.
///
/// Lists are ordered by title so pages are deterministic across adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Return one page of courses and the total number of courses.
    async fn list(&self, page: PageRequest) -> Result<(Vec<Course>, u64), CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Insert a course, assigning an identity and creation time when absent.
    async fn create(&self, course: NewCourse) -> Result<Course, CourseRepositoryError>;

    /// Replace a stored course. Returns `None` when the id is unknown.
    async fn update(&self, course: &Course) -> Result<Option<Course>, CourseRepositoryError>;

    /// Delete a course. Returns `false` when the id is unknown.
    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError>;

    /// Whether any course other than `exclude` already uses `title`.
    async fn exists_by_title(
        &self,
        title: &CourseTitle,
        exclude: Option<CourseId>,
    ) -> Result<bool, CourseRepositoryError>;
}

//! Port abstraction for enrollment persistence adapters.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{CourseId, Enrollment, EnrollmentId, NewEnrollment, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection => "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "enrollment repository query failed: {message}",
        /// The (course, user) unique index rejected the insert.
        Duplicate => "enrollment repository rejected duplicate: {message}",
    }
}

/// Port for reading and writing enrollments.
///
/// Lists are ordered by enrollment id so pages are deterministic across
/// adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Return one page of enrollments and the total number of enrollments.
    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Enrollment>, u64), EnrollmentRepositoryError>;

    /// Fetch an enrollment by identifier.
    async fn find_by_id(
        &self,
        id: &EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Fetch the enrollment for a given user and course, if any.
    async fn find_by_user_and_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Insert an enrollment, assigning an identity when absent.
    async fn create(&self, enrollment: NewEnrollment)
    -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Replace a stored enrollment. Returns `None` when the id is unknown.
    async fn update(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Delete an enrollment. Returns `false` when the id is unknown.
    async fn delete(&self, id: &EnrollmentId) -> Result<bool, EnrollmentRepositoryError>;
}

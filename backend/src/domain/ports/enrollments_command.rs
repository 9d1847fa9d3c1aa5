//! Driving port for enrollment mutations.

use async_trait::async_trait;

use crate::domain::{CourseId, EnrollmentId, EnrollmentStatus, Error, UserId};

use super::EnrollmentView;

/// Request to enroll a user in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateEnrollmentRequest {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Request to move an enrollment to a new status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateEnrollmentStatusRequest {
    pub enrollment_id: EnrollmentId,
    pub status: EnrollmentStatus,
}

/// Driving port for enrollment writes.
///
/// # Errors
/// - `NotFound` when the referenced user, course, or enrollment is missing.
/// - `Conflict` when the (user, course) pair is already enrolled.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentsCommand: Send + Sync {
    async fn create_enrollment(
        &self,
        request: CreateEnrollmentRequest,
    ) -> Result<EnrollmentView, Error>;

    async fn update_enrollment_status(
        &self,
        request: UpdateEnrollmentStatusRequest,
    ) -> Result<EnrollmentView, Error>;

    async fn delete_enrollment(&self, id: EnrollmentId) -> Result<(), Error>;
}

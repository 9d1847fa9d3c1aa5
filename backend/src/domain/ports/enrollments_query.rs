//! Driving port for enrollment read operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};

use crate::domain::{CourseId, Enrollment, EnrollmentId, EnrollmentStatus, Error, UserId};

/// Enrollment projection. Summary and detail views share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentView {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub enrolled_utc: DateTime<Utc>,
    pub completed_utc: Option<DateTime<Utc>>,
}

impl From<&Enrollment> for EnrollmentView {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id(),
            user_id: enrollment.user_id(),
            course_id: enrollment.course_id(),
            status: enrollment.status(),
            enrolled_utc: enrollment.enrolled_at(),
            completed_utc: enrollment.completed_at(),
        }
    }
}

/// Driving port for enrollment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentsQuery: Send + Sync {
    async fn list_enrollments(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<EnrollmentView>, Error>;

    /// Fetch one enrollment; `NotFound` when the id is unknown.
    async fn get_enrollment(&self, id: EnrollmentId) -> Result<EnrollmentView, Error>;
}

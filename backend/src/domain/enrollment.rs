//! Enrollment of a user in a course and its status lifecycle.
//!
//! Any status may move to any other. The completion timestamp is recorded the
//! first time an enrollment becomes `COMPLETED` and never changes afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseId, EnrollmentId, UserId};

/// Error returned when a status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of PENDING, ACTIVE, COMPLETED, CANCELLED (got {value:?})")]
pub struct ParseEnrollmentStatusError {
    value: String,
}

/// Enrollment status. Rendered in upper case on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl EnrollmentStatus {
    /// Every status in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Active,
        Self::Completed,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ParseEnrollmentStatusError;

    /// Parsing is exact; lower-case or padded values are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnrollmentStatusError {
                value: s.to_owned(),
            })
    }
}

/// A user's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    id: EnrollmentId,
    user_id: UserId,
    course_id: CourseId,
    status: EnrollmentStatus,
    enrolled_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object used to rebuild an enrollment from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<EnrollmentDraft> for Enrollment {
    fn from(draft: EnrollmentDraft) -> Self {
        let EnrollmentDraft {
            id,
            user_id,
            course_id,
            status,
            enrolled_at,
            completed_at,
        } = draft;
        Self {
            id,
            user_id,
            course_id,
            status,
            enrolled_at,
            completed_at,
        }
    }
}

impl Enrollment {
    pub fn id(&self) -> EnrollmentId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Move to `status`, stamping the completion time on the first
    /// transition to [`EnrollmentStatus::Completed`].
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use training_tracker::domain::{
    ///     CourseId, EnrollmentStatus, NewEnrollment, UserId,
    /// };
    ///
    /// let start = Utc::now();
    /// let mut enrollment =
    ///     NewEnrollment::pending(UserId::random(), CourseId::random(), start).into_enrollment();
    /// enrollment.apply_status(EnrollmentStatus::Completed, start);
    /// enrollment.apply_status(EnrollmentStatus::Completed, start + Duration::days(1));
    /// assert_eq!(enrollment.completed_at(), Some(start));
    /// ```
    pub fn apply_status(&mut self, status: EnrollmentStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == EnrollmentStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }
}

/// Enrollment awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub id: Option<EnrollmentId>,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl NewEnrollment {
    /// A fresh enrollment in [`EnrollmentStatus::Pending`].
    pub fn pending(user_id: UserId, course_id: CourseId, enrolled_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id,
            course_id,
            status: EnrollmentStatus::Pending,
            enrolled_at,
        }
    }

    /// Materialise the enrollment, generating an identity when missing.
    pub fn into_enrollment(self) -> Enrollment {
        Enrollment::from(EnrollmentDraft {
            id: self.id.unwrap_or_else(EnrollmentId::random),
            user_id: self.user_id,
            course_id: self.course_id,
            status: self.status,
            enrolled_at: self.enrolled_at,
            completed_at: None,
        })
    }
}

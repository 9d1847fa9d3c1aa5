//! In-memory [`EnrollmentRepository`].

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{CourseId, Enrollment, EnrollmentId, NewEnrollment, UserId};

use super::{lock, sorted_page};

/// Enrollment store ordered by id on list.
///
/// Pair uniqueness is not enforced here; see the module docs.
#[derive(Default)]
pub struct MemoryEnrollmentRepository {
    enrollments: Mutex<Vec<Enrollment>>,
}

impl MemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn enrollments(&self) -> Result<MutexGuard<'_, Vec<Enrollment>>, EnrollmentRepositoryError> {
        lock(&self.enrollments, "enrollment", EnrollmentRepositoryError::query)
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryEnrollmentRepository {
    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Enrollment>, u64), EnrollmentRepositoryError> {
        let enrollments = self.enrollments()?;
        Ok(sorted_page(&enrollments, page, |left, right| {
            left.id().cmp(&right.id())
        }))
    }

    async fn find_by_id(
        &self,
        id: &EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .enrollments()?
            .iter()
            .find(|enrollment| enrollment.id() == *id)
            .cloned())
    }

    async fn find_by_user_and_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .enrollments()?
            .iter()
            .find(|enrollment| {
                enrollment.user_id() == *user_id && enrollment.course_id() == *course_id
            })
            .cloned())
    }

    async fn create(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let created = enrollment.into_enrollment();
        self.enrollments()?.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut enrollments = self.enrollments()?;
        let Some(stored) = enrollments
            .iter_mut()
            .find(|stored| stored.id() == enrollment.id())
        else {
            return Ok(None);
        };
        *stored = enrollment.clone();
        Ok(Some(enrollment.clone()))
    }

    async fn delete(&self, id: &EnrollmentId) -> Result<bool, EnrollmentRepositoryError> {
        let mut enrollments = self.enrollments()?;
        let before = enrollments.len();
        enrollments.retain(|enrollment| enrollment.id() != *id);
        Ok(enrollments.len() != before)
    }
}

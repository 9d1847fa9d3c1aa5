//! Enrollment domain service.
//!
//! Creation checks, in order: the user exists, the course exists, and the
//! pair is not already enrolled. Only then is a `PENDING` enrollment stored.
//! The checks and the insert are separate round-trips; the relational store
//! backs the pair check with a unique index, surfaced here as `Conflict`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::course_service::course_not_found;
use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, CreateEnrollmentRequest, EnrollmentRepository,
    EnrollmentRepositoryError, EnrollmentView, EnrollmentsCommand, EnrollmentsQuery,
    UpdateEnrollmentStatusRequest, UserRepository, UserRepositoryError,
};
use crate::domain::user_service::user_not_found;
use crate::domain::{EnrollmentId, Error, NewEnrollment};

const ALREADY_ENROLLED: &str = "User is already enrolled in this course";

/// Enrollment service implementing the enrollment driving ports.
#[derive(Clone)]
pub struct EnrollmentService<E, U, C> {
    enrollments: Arc<E>,
    users: Arc<U>,
    courses: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<E, U, C> EnrollmentService<E, U, C> {
    pub fn new(
        enrollments: Arc<E>,
        users: Arc<U>,
        courses: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            enrollments,
            users,
            courses,
            clock,
        }
    }
}

fn enrollment_not_found(id: EnrollmentId) -> Error {
    Error::not_found(format!("enrollment {id} not found"))
}

fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
        EnrollmentRepositoryError::Duplicate { message } => {
            debug!(%message, "unique index rejected enrollment");
            Error::conflict(ALREADY_ENROLLED)
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } | UserRepositoryError::Duplicate { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } | CourseRepositoryError::Duplicate { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

#[async_trait]
impl<E, U, C> EnrollmentsQuery for EnrollmentService<E, U, C>
where
    E: EnrollmentRepository,
    U: UserRepository,
    C: CourseRepository,
{
    async fn list_enrollments(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<EnrollmentView>, Error> {
        let (enrollments, total) = self
            .enrollments
            .list(page)
            .await
            .map_err(map_enrollment_error)?;
        let items = enrollments.iter().map(EnrollmentView::from).collect();
        Ok(Paginated::new(items, page, total))
    }

    async fn get_enrollment(&self, id: EnrollmentId) -> Result<EnrollmentView, Error> {
        self.enrollments
            .find_by_id(&id)
            .await
            .map_err(map_enrollment_error)?
            .map(|enrollment| EnrollmentView::from(&enrollment))
            .ok_or_else(|| enrollment_not_found(id))
    }
}

#[async_trait]
impl<E, U, C> EnrollmentsCommand for EnrollmentService<E, U, C>
where
    E: EnrollmentRepository,
    U: UserRepository,
    C: CourseRepository,
{
    async fn create_enrollment(
        &self,
        request: CreateEnrollmentRequest,
    ) -> Result<EnrollmentView, Error> {
        let CreateEnrollmentRequest { user_id, course_id } = request;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        self.courses
            .find_by_id(&course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(course_id))?;

        let existing = self
            .enrollments
            .find_by_user_and_course(&user_id, &course_id)
            .await
            .map_err(map_enrollment_error)?;
        if existing.is_some() {
            return Err(Error::conflict(ALREADY_ENROLLED));
        }

        let enrollment = self
            .enrollments
            .create(NewEnrollment::pending(user_id, course_id, self.clock.utc()))
            .await
            .map_err(map_enrollment_error)?;
        info!(
            enrollment_id = %enrollment.id(),
            user_id = %user_id,
            course_id = %course_id,
            "enrollment created"
        );
        Ok(EnrollmentView::from(&enrollment))
    }

    async fn update_enrollment_status(
        &self,
        request: UpdateEnrollmentStatusRequest,
    ) -> Result<EnrollmentView, Error> {
        let UpdateEnrollmentStatusRequest {
            enrollment_id,
            status,
        } = request;
        let mut enrollment = self
            .enrollments
            .find_by_id(&enrollment_id)
            .await
            .map_err(map_enrollment_error)?
            .ok_or_else(|| enrollment_not_found(enrollment_id))?;
        enrollment.apply_status(status, self.clock.utc());
        let stored = self
            .enrollments
            .update(&enrollment)
            .await
            .map_err(map_enrollment_error)?
            .ok_or_else(|| enrollment_not_found(enrollment_id))?;
        debug!(enrollment_id = %enrollment_id, %status, "enrollment status changed");
        Ok(EnrollmentView::from(&stored))
    }

    async fn delete_enrollment(&self, id: EnrollmentId) -> Result<(), Error> {
        let removed = self
            .enrollments
            .delete(&id)
            .await
            .map_err(map_enrollment_error)?;
        if removed {
            Ok(())
        } else {
            Err(enrollment_not_found(id))
        }
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;

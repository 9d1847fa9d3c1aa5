//! Tests for the enrollment service.

use std::sync::Arc;

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCourseRepository, MockEnrollmentRepository, MockUserRepository};
use crate::domain::{
    Course, CourseId, Enrollment, EnrollmentDraft, EnrollmentStatus, ErrorCode, User, UserId,
};
use crate::test_support::{
    FixtureClock, course_details, fixture_clock, fixture_timestamp, profile,
};

type Service =
    EnrollmentService<MockEnrollmentRepository, MockUserRepository, MockCourseRepository>;

struct Mocks {
    enrollments: MockEnrollmentRepository,
    users: MockUserRepository,
    courses: MockCourseRepository,
}

impl Mocks {
    fn into_service(self) -> Service {
        EnrollmentService::new(
            Arc::new(self.enrollments),
            Arc::new(self.users),
            Arc::new(self.courses),
            fixture_clock(),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        enrollments: MockEnrollmentRepository::new(),
        users: MockUserRepository::new(),
        courses: MockCourseRepository::new(),
    }
}

fn user() -> User {
    User::new(
        UserId::random(),
        profile("alice@x.com", "Alice Example"),
        fixture_timestamp(),
    )
}

fn course() -> Course {
    Course::new(
        CourseId::random(),
        course_details("Safety 101", true),
        fixture_timestamp(),
    )
}

fn stored_enrollment(status: EnrollmentStatus) -> Enrollment {
    Enrollment::from(EnrollmentDraft {
        id: EnrollmentId::random(),
        user_id: UserId::random(),
        course_id: CourseId::random(),
        status,
        enrolled_at: fixture_timestamp() - Duration::days(3),
        completed_at: None,
    })
}

fn request() -> CreateEnrollmentRequest {
    CreateEnrollmentRequest {
        user_id: UserId::random(),
        course_id: CourseId::random(),
    }
}

#[rstest]
#[tokio::test]
async fn create_stores_pending_enrollment(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user())));
    mocks
        .courses
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(course())));
    mocks
        .enrollments
        .expect_find_by_user_and_course()
        .times(1)
        .return_once(|_, _| Ok(None));
    mocks
        .enrollments
        .expect_create()
        .withf(|draft| {
            draft.status == EnrollmentStatus::Pending && draft.enrolled_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|draft| Ok(draft.into_enrollment()));

    let request = request();
    let view = mocks
        .into_service()
        .create_enrollment(request)
        .await
        .expect("create succeeds");

    assert_eq!(view.user_id, request.user_id);
    assert_eq!(view.course_id, request.course_id);
    assert_eq!(view.status, EnrollmentStatus::Pending);
    assert_eq!(view.completed_utc, None);
}

#[rstest]
#[tokio::test]
async fn create_with_missing_user_is_not_found(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    mocks.courses.expect_find_by_id().times(0);
    mocks.enrollments.expect_create().times(0);

    let error = mocks
        .into_service()
        .create_enrollment(request())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().starts_with("user "));
}

#[rstest]
#[tokio::test]
async fn create_with_missing_course_is_not_found(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user())));
    mocks
        .courses
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    mocks.enrollments.expect_create().times(0);

    let error = mocks
        .into_service()
        .create_enrollment(request())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().starts_with("course "));
}

#[rstest]
#[tokio::test]
async fn create_rejects_existing_pair(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user())));
    mocks
        .courses
        .expect_find_by_id()
        .return_once(|_| Ok(Some(course())));
    mocks
        .enrollments
        .expect_find_by_user_and_course()
        .return_once(|_, _| Ok(Some(stored_enrollment(EnrollmentStatus::Active))));
    mocks.enrollments.expect_create().times(0);

    let error = mocks
        .into_service()
        .create_enrollment(request())
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), ALREADY_ENROLLED);
}

#[rstest]
#[tokio::test]
async fn create_maps_unique_index_violation_to_conflict(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user())));
    mocks
        .courses
        .expect_find_by_id()
        .return_once(|_| Ok(Some(course())));
    mocks
        .enrollments
        .expect_find_by_user_and_course()
        .return_once(|_, _| Ok(None));
    mocks
        .enrollments
        .expect_create()
        .return_once(|_| Err(EnrollmentRepositoryError::duplicate("ix_enrollments_course_user")));

    let error = mocks
        .into_service()
        .create_enrollment(request())
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn completing_twice_keeps_first_completion_time(mut mocks: Mocks) {
    let first = stored_enrollment(EnrollmentStatus::Active);
    let id = first.id();
    let mut completed = first.clone();
    completed.apply_status(EnrollmentStatus::Completed, fixture_timestamp());

    mocks
        .enrollments
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(completed)));
    mocks
        .enrollments
        .expect_update()
        .times(1)
        .returning(|enrollment| Ok(Some(enrollment.clone())));

    let later = fixture_timestamp() + Duration::hours(4);
    let service = EnrollmentService::new(
        Arc::new(mocks.enrollments),
        Arc::new(mocks.users),
        Arc::new(mocks.courses),
        Arc::new(FixtureClock { utc_now: later }),
    );
    let view = service
        .update_enrollment_status(UpdateEnrollmentStatusRequest {
            enrollment_id: id,
            status: EnrollmentStatus::Completed,
        })
        .await
        .expect("update succeeds");

    assert_eq!(view.status, EnrollmentStatus::Completed);
    assert_eq!(view.completed_utc, Some(fixture_timestamp()));
}

#[rstest]
#[case(EnrollmentStatus::Completed, Some(fixture_timestamp()))]
#[case(EnrollmentStatus::Cancelled, None)]
#[case(EnrollmentStatus::Pending, None)]
#[tokio::test]
async fn status_update_stamps_completion_only_for_completed(
    mut mocks: Mocks,
    #[case] status: EnrollmentStatus,
    #[case] completed_utc: Option<chrono::DateTime<chrono::Utc>>,
) {
    let stored = stored_enrollment(EnrollmentStatus::Active);
    let id = stored.id();
    mocks
        .enrollments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    mocks
        .enrollments
        .expect_update()
        .returning(|enrollment| Ok(Some(enrollment.clone())));

    let view = mocks
        .into_service()
        .update_enrollment_status(UpdateEnrollmentStatusRequest {
            enrollment_id: id,
            status,
        })
        .await
        .expect("update succeeds");

    assert_eq!(view.status, status);
    assert_eq!(view.completed_utc, completed_utc);
}

#[rstest]
#[tokio::test]
async fn status_update_for_missing_enrollment_is_not_found(mut mocks: Mocks) {
    mocks
        .enrollments
        .expect_find_by_id()
        .return_once(|_| Ok(None));
    mocks.enrollments.expect_update().times(0);

    let error = mocks
        .into_service()
        .update_enrollment_status(UpdateEnrollmentStatusRequest {
            enrollment_id: EnrollmentId::random(),
            status: EnrollmentStatus::Active,
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(EnrollmentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(EnrollmentRepositoryError::query("timeout"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_maps_repository_failures(
    mut mocks: Mocks,
    #[case] failure: EnrollmentRepositoryError,
    #[case] expected: ErrorCode,
) {
    mocks
        .enrollments
        .expect_list()
        .return_once(move |_| Err(failure));

    let error = mocks
        .into_service()
        .list_enrollments(PageRequest::default())
        .await
        .expect_err("failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn delete_missing_enrollment_is_not_found(mut mocks: Mocks) {
    mocks.enrollments.expect_delete().return_once(|_| Ok(false));

    let error = mocks
        .into_service()
        .delete_enrollment(EnrollmentId::random())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

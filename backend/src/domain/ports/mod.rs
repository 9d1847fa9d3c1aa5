//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`StorageProbe`]) are implemented by the
//! outbound adapters. Driving ports (`*Query`, `*Command`) are implemented by
//! the domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_command;
mod admin_query;
mod course_repository;
mod courses_command;
mod courses_query;
mod enrollment_repository;
mod enrollments_command;
mod enrollments_query;
mod storage_probe;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use admin_command::MockAdminCommand;
pub use admin_command::{AdminCommand, BulkUpdateOutcome, BulkUserStatusRequest};
#[cfg(test)]
pub use admin_query::MockAdminQuery;
pub use admin_query::{AdminQuery, ComponentStatus, SystemHealth, SystemStatistics};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use courses_command::MockCoursesCommand;
pub use courses_command::{CoursesCommand, CreateCourseRequest, UpdateCourseRequest};
#[cfg(test)]
pub use courses_query::MockCoursesQuery;
pub use courses_query::{CourseDetail, CourseSummary, CoursesQuery};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
#[cfg(test)]
pub use enrollments_command::MockEnrollmentsCommand;
pub use enrollments_command::{
    CreateEnrollmentRequest, EnrollmentsCommand, UpdateEnrollmentStatusRequest,
};
#[cfg(test)]
pub use enrollments_query::MockEnrollmentsQuery;
pub use enrollments_query::{EnrollmentView, EnrollmentsQuery};
#[cfg(test)]
pub use storage_probe::MockStorageProbe;
pub use storage_probe::{StorageProbe, StorageStatus};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{UserDetail, UserSummary, UsersQuery};

//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: hold the training tracker's business rules independent of HTTP
//! and storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Course, Enrollment: aggregates with validated value types.
//! - UserService, CourseService, EnrollmentService, AdminService: use-cases.

pub mod admin_service;
pub mod course;
pub mod course_service;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::admin_service::{AdminService, STATISTICS_SAMPLE_LIMIT};
pub use self::course::{
    Course, CourseDetails, CourseDetailsDraft, CourseTitle, CourseValidationError, NewCourse,
    ValidityMonths,
};
pub use self::course_service::CourseService;
pub use self::enrollment::{
    Enrollment, EnrollmentDraft, EnrollmentStatus, NewEnrollment, ParseEnrollmentStatusError,
};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{CourseId, EnrollmentId, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, NewUser, PersonName, User, UserProfile, UserValidationError};
pub use self::user_service::UserService;

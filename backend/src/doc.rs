//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer along with
//! the schema wrappers in [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives. The document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::admin::BulkUserStatusBody;
use crate::inbound::http::courses::{CreateCourseBody, UpdateCourseBody};
use crate::inbound::http::enrollments::{CreateEnrollmentBody, UpdateStatusBody};
use crate::inbound::http::health::{Dependencies, HealthResponse, ReadinessResponse};
use crate::inbound::http::schemas::{
    BulkUpdateOutcomeSchema, ComponentStatusSchema, CourseDetailSchema, CoursePageSchema,
    CourseSummarySchema, EnrollmentPageSchema, EnrollmentSchema, EnrollmentStatusSchema,
    ErrorCodeSchema, ErrorSchema, SystemHealthSchema, SystemStatisticsSchema, UserDetailSchema,
    UserPageSchema, UserSummarySchema,
};
use crate::inbound::http::users::{CreateUserBody, UpdateUserBody};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Training tracker API",
        description = "Users, courses and course enrollments with admin reporting and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::get_enrollment,
        crate::inbound::http::enrollments::create_enrollment,
        crate::inbound::http::enrollments::update_enrollment_status,
        crate::inbound::http::enrollments::delete_enrollment,
        crate::inbound::http::admin::statistics,
        crate::inbound::http::admin::system_health,
        crate::inbound::http::admin::bulk_update_user_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSummarySchema,
        UserDetailSchema,
        UserPageSchema,
        CourseSummarySchema,
        CourseDetailSchema,
        CoursePageSchema,
        EnrollmentStatusSchema,
        EnrollmentSchema,
        EnrollmentPageSchema,
        SystemStatisticsSchema,
        ComponentStatusSchema,
        SystemHealthSchema,
        BulkUpdateOutcomeSchema,
        CreateUserBody,
        UpdateUserBody,
        CreateCourseBody,
        UpdateCourseBody,
        CreateEnrollmentBody,
        UpdateStatusBody,
        BulkUserStatusBody,
        HealthResponse,
        ReadinessResponse,
        Dependencies,
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "courses", description = "Training course catalogue"),
        (name = "enrollments", description = "Course enrollments and completion"),
        (name = "admin", description = "Aggregate reporting and bulk operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

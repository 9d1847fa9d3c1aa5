//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested or referenced resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with a uniqueness or duplication rule.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing dependency is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: email")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, usually `{field, code}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::EnrollmentStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EnrollmentStatus)]
pub enum EnrollmentStatusSchema {
    #[schema(rename = "PENDING")]
    Pending,
    #[schema(rename = "ACTIVE")]
    Active,
    #[schema(rename = "COMPLETED")]
    Completed,
    #[schema(rename = "CANCELLED")]
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::ports::UserSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::UserSummary, rename_all = "camelCase")]
pub struct UserSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "alice@example.com")]
    email: String,
    #[schema(example = "Alice Example")]
    full_name: String,
    is_active: bool,
    #[schema(value_type = String, format = DateTime)]
    created_utc: String,
}

/// OpenAPI schema for [`crate::domain::ports::UserDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::UserDetail, rename_all = "camelCase")]
pub struct UserDetailSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    email: String,
    full_name: String,
    #[schema(example = "Alice")]
    first_name: String,
    #[schema(example = "Example")]
    last_name: String,
    is_active: bool,
    #[schema(value_type = String, format = DateTime)]
    created_utc: String,
}

/// OpenAPI schema for [`crate::domain::ports::CourseSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::CourseSummary, rename_all = "camelCase")]
pub struct CourseSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Safety Orientation")]
    title: String,
    is_required: bool,
    is_active: bool,
    #[schema(minimum = 1, maximum = 120)]
    validity_months: Option<u16>,
    category: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::CourseDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::CourseDetail, rename_all = "camelCase")]
pub struct CourseDetailSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    title: String,
    is_required: bool,
    is_active: bool,
    #[schema(minimum = 1, maximum = 120)]
    validity_months: Option<u16>,
    category: Option<String>,
    description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_utc: String,
}

/// OpenAPI schema for [`crate::domain::ports::EnrollmentView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::EnrollmentView, rename_all = "camelCase")]
pub struct EnrollmentSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(value_type = String, format = Uuid)]
    course_id: String,
    status: EnrollmentStatusSchema,
    #[schema(value_type = String, format = DateTime)]
    enrolled_utc: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    completed_utc: Option<String>,
}

macro_rules! page_schema {
    ($schema:ident, $name:ident, $item:ty) => {
        /// Paged list envelope.
        #[derive(ToSchema)]
        #[schema(as = $name, rename_all = "camelCase")]
        pub struct $schema {
            items: Vec<$item>,
            page: u32,
            page_size: u32,
            total_count: u64,
            total_pages: u64,
        }
    };
}

page_schema!(UserPageSchema, UserPage, UserSummarySchema);
page_schema!(CoursePageSchema, CoursePage, CourseSummarySchema);
page_schema!(EnrollmentPageSchema, EnrollmentPage, EnrollmentSchema);

/// OpenAPI schema for [`crate::domain::ports::SystemStatistics`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SystemStatistics, rename_all = "camelCase")]
pub struct SystemStatisticsSchema {
    total_users: u64,
    active_users: u64,
    inactive_users: u64,
    total_courses: u64,
    required_courses: u64,
    optional_courses: u64,
    total_enrollments: u64,
    pending_enrollments: u64,
    active_enrollments: u64,
    completed_enrollments: u64,
    cancelled_enrollments: u64,
    /// Completed enrollments as a percentage, one decimal place.
    #[schema(example = 33.3)]
    completion_rate: f64,
}

/// OpenAPI schema for [`crate::domain::ports::ComponentStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::ComponentStatus)]
pub enum ComponentStatusSchema {
    Healthy,
    Unhealthy,
}

/// OpenAPI schema for [`crate::domain::ports::SystemHealth`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SystemHealth, rename_all = "camelCase")]
pub struct SystemHealthSchema {
    api_status: ComponentStatusSchema,
    database_status: ComponentStatusSchema,
    database_error: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    timestamp: String,
}

/// OpenAPI schema for [`crate::domain::ports::BulkUpdateOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BulkUpdateOutcome, rename_all = "camelCase")]
pub struct BulkUpdateOutcomeSchema {
    total_requested: usize,
    success_count: usize,
    failed_count: usize,
    #[schema(example = json!(["User 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found"]))]
    errors: Vec<String>,
}

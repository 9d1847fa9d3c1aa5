//! Enrollments API handlers.
//!
//! ```text
//! GET    /api/enrollments?page=&pageSize=
//! GET    /api/enrollments/{id}
//! POST   /api/enrollments {"userId":"...","courseId":"..."}
//! PATCH  /api/enrollments/{id}/status {"status":"COMPLETED"}
//! DELETE /api/enrollments/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateEnrollmentRequest, EnrollmentView, UpdateEnrollmentStatusRequest};
use crate::domain::{CourseId, EnrollmentId, EnrollmentStatus, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EnrollmentPageSchema, EnrollmentSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PageQuery, field_value_error, missing_field_error, parse_uuid,
};

const ID: FieldName = FieldName::new("id");
const USER_ID: FieldName = FieldName::new("userId");
const COURSE_ID: FieldName = FieldName::new("courseId");
const STATUS: FieldName = FieldName::new("status");

/// Request body for `POST /api/enrollments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentBody {
    #[schema(format = Uuid)]
    pub user_id: Option<String>,
    #[schema(format = Uuid)]
    pub course_id: Option<String>,
}

/// Request body for `PATCH /api/enrollments/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusBody {
    /// One of `PENDING`, `ACTIVE`, `COMPLETED`, `CANCELLED`.
    #[schema(example = "COMPLETED")]
    pub status: Option<String>,
}

fn parse_status(raw: &str) -> Result<EnrollmentStatus, Error> {
    raw.parse::<EnrollmentStatus>()
        .map_err(|err| field_value_error("status", "invalid_status", err.to_string(), raw))
}

fn parse_enrollment_id(raw: &str) -> Result<EnrollmentId, Error> {
    parse_uuid(raw, ID).map(EnrollmentId::from_uuid)
}

fn parse_create(body: CreateEnrollmentBody) -> Result<CreateEnrollmentRequest, Error> {
    let user_id = body.user_id.ok_or_else(|| missing_field_error(USER_ID))?;
    let course_id = body.course_id.ok_or_else(|| missing_field_error(COURSE_ID))?;
    Ok(CreateEnrollmentRequest {
        user_id: UserId::from_uuid(parse_uuid(&user_id, USER_ID)?),
        course_id: CourseId::from_uuid(parse_uuid(&course_id, COURSE_ID)?),
    })
}

/// List enrollments ordered by id.
#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of enrollments", body = EnrollmentPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<EnrollmentView>>> {
    let page = PageRequest::from(query.into_inner());
    Ok(web::Json(state.enrollments.list_enrollments(page).await?))
}

/// Fetch one enrollment.
#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(("id" = String, Path, description = "Enrollment identifier")),
    responses(
        (status = 200, description = "Enrollment", body = EnrollmentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "getEnrollment"
)]
#[get("/enrollments/{id}")]
pub async fn get_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EnrollmentView>> {
    let id = parse_enrollment_id(&path)?;
    Ok(web::Json(state.enrollments.get_enrollment(id).await?))
}

/// Enroll a user in a course. The enrollment starts as `PENDING`.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentSchema,
            headers(("Location" = String, description = "URL of the new enrollment"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or course not found", body = ErrorSchema),
        (status = 409, description = "Already enrolled", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "createEnrollment"
)]
#[post("/enrollments")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEnrollmentBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner())?;
    let created = state.enrollments_command.create_enrollment(request).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/enrollments/{}", created.id)))
        .json(created))
}

/// Move an enrollment to a new status.
///
/// The completion time is recorded the first time the status becomes
/// `COMPLETED` and is left untouched by later updates.
#[utoipa::path(
    patch,
    path = "/api/enrollments/{id}/status",
    params(("id" = String, Path, description = "Enrollment identifier")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "updateEnrollmentStatus"
)]
#[patch("/enrollments/{id}/status")]
pub async fn update_enrollment_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<web::Json<EnrollmentView>> {
    let enrollment_id = parse_enrollment_id(&path)?;
    let raw = payload
        .into_inner()
        .status
        .ok_or_else(|| missing_field_error(STATUS))?;
    let status = parse_status(&raw)?;
    let updated = state
        .enrollments_command
        .update_enrollment_status(UpdateEnrollmentStatusRequest {
            enrollment_id,
            status,
        })
        .await?;
    Ok(web::Json(updated))
}

/// Delete an enrollment.
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(("id" = String, Path, description = "Enrollment identifier")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "deleteEnrollment"
)]
#[delete("/enrollments/{id}")]
pub async fn delete_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_enrollment_id(&path)?;
    state.enrollments_command.delete_enrollment(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

//! Courses API handlers.
//!
//! ```text
//! GET    /api/courses?page=&pageSize=
//! GET    /api/courses/{id}
//! POST   /api/courses {"title":"Safety 101","isRequired":true}
//! PUT    /api/courses/{id}
//! DELETE /api/courses/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CourseDetail, CourseSummary, CreateCourseRequest, UpdateCourseRequest};
use crate::domain::{CourseDetails, CourseDetailsDraft, CourseId, CourseValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CourseDetailSchema, CoursePageSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PageQuery, field_error, missing_field_error, parse_uuid,
};

const ID: FieldName = FieldName::new("id");
const TITLE: FieldName = FieldName::new("title");

/// Request body for `POST /api/courses`. New courses are always active.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseBody {
    #[schema(example = "Safety 101")]
    pub title: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[schema(minimum = 1, maximum = 120)]
    pub validity_months: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PUT /api/courses/{id}`; flags default to `false`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseBody {
    pub title: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_active: bool,
    #[schema(minimum = 1, maximum = 120)]
    pub validity_months: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl From<CreateCourseBody> for UpdateCourseBody {
    fn from(body: CreateCourseBody) -> Self {
        Self {
            title: body.title,
            is_required: body.is_required,
            is_active: true,
            validity_months: body.validity_months,
            category: body.category,
            description: body.description,
        }
    }
}

fn map_course_validation_error(err: CourseValidationError) -> Error {
    let code = match err {
        CourseValidationError::EmptyTitle => "empty_title",
        CourseValidationError::TitleTooLong { .. } => "title_too_long",
        CourseValidationError::ValidityOutOfRange { .. } => "validity_out_of_range",
        CourseValidationError::CategoryTooLong { .. } => "category_too_long",
        CourseValidationError::DescriptionTooLong { .. } => "description_too_long",
    };
    field_error(err.field(), code, err.to_string())
}

fn parse_details(body: UpdateCourseBody) -> Result<CourseDetails, Error> {
    let title = body.title.ok_or_else(|| missing_field_error(TITLE))?;
    CourseDetails::try_from(CourseDetailsDraft {
        title,
        is_required: body.is_required,
        is_active: body.is_active,
        validity_months: body.validity_months,
        category: body.category,
        description: body.description,
    })
    .map_err(map_course_validation_error)
}

pub(crate) fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    parse_uuid(raw, ID).map(CourseId::from_uuid)
}

/// List courses ordered by title.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of courses", body = CoursePageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<CourseSummary>>> {
    let page = PageRequest::from(query.into_inner());
    Ok(web::Json(state.courses.list_courses(page).await?))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseDetailSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseDetail>> {
    let id = parse_course_id(&path)?;
    Ok(web::Json(state.courses.get_course(id).await?))
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseBody,
    responses(
        (status = 201, description = "Course created", body = CourseDetailSchema,
            headers(("Location" = String, description = "URL of the new course"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Title already in use", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCourseBody>,
) -> ApiResult<HttpResponse> {
    let details = parse_details(payload.into_inner().into())?;
    let created = state
        .courses_command
        .create_course(CreateCourseRequest { details })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/courses/{}", created.id)))
        .json(created))
}

/// Replace a course's details.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = UpdateCourseBody,
    responses(
        (status = 200, description = "Course updated", body = CourseDetailSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Title already in use", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCourseBody>,
) -> ApiResult<web::Json<CourseDetail>> {
    let course_id = parse_course_id(&path)?;
    let details = parse_details(payload.into_inner())?;
    let updated = state
        .courses_command
        .update_course(UpdateCourseRequest { course_id, details })
        .await?;
    Ok(web::Json(updated))
}

/// Delete a course.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_course_id(&path)?;
    state.courses_command.delete_course(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

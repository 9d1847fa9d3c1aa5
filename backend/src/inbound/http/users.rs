//! Users API handlers.
//!
//! ```text
//! GET    /api/users?page=&pageSize=
//! GET    /api/users/{id}
//! POST   /api/users {"email":"alice@example.com","fullName":"Alice Example"}
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest, UserDetail, UserSummary};
use crate::domain::{EmailAddress, Error, PersonName, UserId, UserProfile, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserDetailSchema, UserPageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PageQuery, field_error, missing_field_error, parse_uuid,
};

const ID: FieldName = FieldName::new("id");
const EMAIL: FieldName = FieldName::new("email");
const FULL_NAME: FieldName = FieldName::new("fullName");

fn default_active() -> bool {
    true
}

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "Alice Example")]
    pub full_name: Option<String>,
    /// Defaults to `true`.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request body for `PUT /api/users/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub email: Option<String>,
    pub full_name: Option<String>,
    /// Defaults to `false` when omitted.
    #[serde(default)]
    pub is_active: bool,
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::EmailTooLong { .. } => "email_too_long",
        UserValidationError::InvalidEmail => "invalid_email",
        UserValidationError::EmptyFullName => "empty_full_name",
        UserValidationError::FullNameTooLong { .. } => "full_name_too_long",
    };
    field_error(err.field(), code, err.to_string())
}

fn parse_profile(
    email: Option<String>,
    full_name: Option<String>,
    is_active: bool,
) -> Result<UserProfile, Error> {
    let email = email.ok_or_else(|| missing_field_error(EMAIL))?;
    let full_name = full_name.ok_or_else(|| missing_field_error(FULL_NAME))?;
    Ok(UserProfile {
        email: EmailAddress::new(email).map_err(map_user_validation_error)?,
        name: PersonName::parse(&full_name).map_err(map_user_validation_error)?,
        is_active,
    })
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_uuid(raw, ID).map(UserId::from_uuid)
}

/// List users ordered by email.
#[utoipa::path(
    get,
    path = "/api/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of users", body = UserPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<UserSummary>>> {
    let page = PageRequest::from(query.into_inner());
    Ok(web::Json(state.users.list_users(page).await?))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserDetailSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDetail>> {
    let id = parse_user_id(&path)?;
    Ok(web::Json(state.users.get_user(id).await?))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserDetailSchema,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserBody {
        email,
        full_name,
        is_active,
    } = payload.into_inner();
    let profile = parse_profile(email, full_name, is_active)?;
    let created = state
        .users_command
        .create_user(CreateUserRequest { profile })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/users/{}", created.id)))
        .json(created))
}

/// Replace a user's profile.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = UserDetailSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserDetail>> {
    let user_id = parse_user_id(&path)?;
    let UpdateUserBody {
        email,
        full_name,
        is_active,
    } = payload.into_inner();
    let profile = parse_profile(email, full_name, is_active)?;
    let updated = state
        .users_command
        .update_user(UpdateUserRequest { user_id, profile })
        .await?;
    Ok(web::Json(updated))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;

//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request failure becomes an `invalid_request` error whose `details`
//! name the offending field and a stable failure code.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use pagination::PageRequest;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidBody,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }

    fn with_index(self, code: &str, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code,
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField.as_str())
}

/// A domain validation failure on `field`, e.g. an over-long title.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    ValidationError::new(field, message).with_code(code)
}

/// Like [`field_error`] but echoes the rejected value.
pub(crate) fn field_value_error(
    field: &str,
    code: &str,
    message: impl Into<String>,
    value: &str,
) -> Error {
    ValidationError::new(field, message).with_value(code, value)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid.as_str(), value)
}

pub(crate) fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid.as_str(),
        index,
        value,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_uuid_list(values: Vec<String>, field: FieldName) -> Result<Vec<Uuid>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Uuid::parse_str(&value).map_err(|_| invalid_uuid_index_error(field, index, &value))
        })
        .collect()
}

/// `?page=&pageSize=` query parameters shared by every list endpoint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number; values below 1 are treated as 1.
    pub page: Option<i64>,
    /// Items per page; values below 1 fall back to 10.
    pub page_size: Option<i64>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::from_query(query.page, query.page_size)
    }
}

fn extractor_error(code: ErrorCode, message: String) -> actix_web::Error {
    debug!(code = code.as_str(), %message, "rejected malformed request");
    Error::invalid_request(message)
        .with_details(json!({ "code": code.as_str() }))
        .into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error(ErrorCode::InvalidBody, format!("invalid request body: {err}"))
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error(ErrorCode::InvalidQuery, format!("invalid query string: {err}"))
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error(ErrorCode::InvalidPath, format!("invalid path: {err}"))
}

/// JSON extractor configuration returning the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration returning the standard error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Path extractor configuration returning the standard error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

//! Internal Diesel row structs for the training tables.
//!
//! Rows never leave the persistence layer; repositories convert them to
//! domain types and back.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{courses, enrollments, users};

/// Row read from `training.users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable user record. `created_at` falls back to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Replacement of a user's mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub is_active: bool,
}

/// Row read from `training.courses`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<i16>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<i16>,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Replacement of a course's mutable columns.
///
/// `treat_none_as_null` so clearing an optional field writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses, treat_none_as_null = true)]
pub(crate) struct CourseChangeset<'a> {
    pub title: &'a str,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<i16>,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Row read from `training.enrollments`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: &'a str,
    pub enrolled_at: DateTime<Utc>,
}

/// Status change; `completed_at` is always written alongside it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = enrollments, treat_none_as_null = true)]
pub(crate) struct EnrollmentStatusChangeset<'a> {
    pub status: &'a str,
    pub completed_at: Option<DateTime<Utc>>,
}

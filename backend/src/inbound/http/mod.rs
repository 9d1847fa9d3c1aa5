//! HTTP inbound adapter exposing REST endpoints.
//!
//! Resource handlers live under `/api`; the health probes are mounted at the
//! root by the server.

use actix_web::web;

pub mod admin;
pub mod courses;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every resource handler. Mount inside `web::scope("/api")`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(courses::list_courses)
        .service(courses::get_course)
        .service(courses::create_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(enrollments::list_enrollments)
        .service(enrollments::get_enrollment)
        .service(enrollments::create_enrollment)
        .service(enrollments::update_enrollment_status)
        .service(enrollments::delete_enrollment)
        .service(admin::statistics)
        .service(admin::system_health)
        .service(admin::bulk_update_user_status);
}

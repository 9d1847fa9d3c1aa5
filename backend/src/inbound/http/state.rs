//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminCommand, AdminQuery, CoursesCommand, CoursesQuery, EnrollmentsCommand, EnrollmentsQuery,
    UsersCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub courses: Arc<dyn CoursesQuery>,
    pub courses_command: Arc<dyn CoursesCommand>,
    pub enrollments: Arc<dyn EnrollmentsQuery>,
    pub enrollments_command: Arc<dyn EnrollmentsCommand>,
    pub admin: Arc<dyn AdminQuery>,
    pub admin_command: Arc<dyn AdminCommand>,
}

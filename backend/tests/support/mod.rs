//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! in-memory app wiring lives here rather than in each test file.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::{Clock, DefaultClock};
use serde_json::Value;

use training_tracker::Trace;
use training_tracker::domain::{AdminService, CourseService, EnrollmentService, UserService};
use training_tracker::inbound::http::configure_api;
use training_tracker::inbound::http::health::{HealthState, live, ready};
use training_tracker::inbound::http::state::HttpState;
use training_tracker::inbound::http::validation::{json_config, path_config, query_config};
use training_tracker::outbound::memory::{
    MemoryCourseRepository, MemoryEnrollmentRepository, MemoryStorageProbe, MemoryUserRepository,
};

/// Fresh, unseeded in-memory state.
pub fn memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(MemoryUserRepository::new(Arc::clone(&clock)));
    let courses = Arc::new(MemoryCourseRepository::new(Arc::clone(&clock)));
    let enrollments = Arc::new(MemoryEnrollmentRepository::new());

    let user_service = Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&clock)));
    let course_service = Arc::new(CourseService::new(Arc::clone(&courses), Arc::clone(&clock)));
    let enrollment_service = Arc::new(EnrollmentService::new(
        enrollments,
        users,
        courses,
        Arc::clone(&clock),
    ));
    let admin_service = Arc::new(AdminService::new(
        user_service.clone(),
        user_service.clone(),
        course_service.clone(),
        enrollment_service.clone(),
        clock,
    ));

    HttpState {
        users: user_service.clone(),
        users_command: user_service,
        courses: course_service.clone(),
        courses_command: course_service,
        enrollments: enrollment_service.clone(),
        enrollments_command: enrollment_service,
        admin: admin_service.clone(),
        admin_command: admin_service,
    }
}

/// The full app over fresh in-memory storage, marked ready.
pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = HealthState::new(Arc::new(MemoryStorageProbe), Arc::new(DefaultClock));
    health.mark_ready();

    App::new()
        .app_data(web::Data::new(health))
        .app_data(web::Data::new(memory_state()))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
        .service(ready)
        .service(live)
}

/// Read a string field from a JSON body.
pub fn text<'a>(body: &'a Value, field: &str) -> &'a str {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {field} in {body}"))
}

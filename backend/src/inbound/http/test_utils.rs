//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::ports::{
    MockAdminCommand, MockAdminQuery, MockCoursesCommand, MockCoursesQuery,
    MockEnrollmentsCommand, MockEnrollmentsQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure_api, validation};

/// Driving-port mocks; set expectations on the ones a test exercises.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUsersQuery,
    pub users_command: MockUsersCommand,
    pub courses: MockCoursesQuery,
    pub courses_command: MockCoursesCommand,
    pub enrollments: MockEnrollmentsQuery,
    pub enrollments_command: MockEnrollmentsCommand,
    pub admin: MockAdminQuery,
    pub admin_command: MockAdminCommand,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            users: Arc::new(self.users),
            users_command: Arc::new(self.users_command),
            courses: Arc::new(self.courses),
            courses_command: Arc::new(self.courses_command),
            enrollments: Arc::new(self.enrollments),
            enrollments_command: Arc::new(self.enrollments_command),
            admin: Arc::new(self.admin),
            admin_command: Arc::new(self.admin_command),
        }
    }
}

/// App with every `/api` route and the production extractor configuration.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(web::scope("/api").configure(configure_api))
}

/// Read `details.code` from an error envelope.
pub fn detail_code(body: &Value) -> Option<&str> {
    body.get("details")
        .and_then(|details| details.get("code"))
        .and_then(Value::as_str)
}

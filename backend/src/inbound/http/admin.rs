//! Admin API handlers.
//!
//! ```text
//! GET   /api/admin/statistics
//! GET   /api/admin/health
//! PATCH /api/admin/users/bulk-status {"userIds":["..."],"isActive":false}
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::{BulkUpdateOutcome, BulkUserStatusRequest, SystemHealth, SystemStatistics};
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    BulkUpdateOutcomeSchema, ErrorSchema, SystemHealthSchema, SystemStatisticsSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_uuid_list};

const USER_IDS: FieldName = FieldName::new("userIds");
const IS_ACTIVE: FieldName = FieldName::new("isActive");

/// Request body for `PATCH /api/admin/users/bulk-status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUserStatusBody {
    pub user_ids: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

fn parse_bulk_request(body: BulkUserStatusBody) -> Result<BulkUserStatusRequest, Error> {
    let user_ids = body.user_ids.ok_or_else(|| missing_field_error(USER_IDS))?;
    let is_active = body.is_active.ok_or_else(|| missing_field_error(IS_ACTIVE))?;
    Ok(BulkUserStatusRequest {
        user_ids: parse_uuid_list(user_ids, USER_IDS)?
            .into_iter()
            .map(UserId::from_uuid)
            .collect(),
        is_active,
    })
}

/// Aggregate counts for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/admin/statistics",
    responses(
        (status = 200, description = "System statistics", body = SystemStatisticsSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "getStatistics"
)]
#[get("/admin/statistics")]
pub async fn statistics(state: web::Data<HttpState>) -> ApiResult<web::Json<SystemStatistics>> {
    info!("fetching system statistics");
    Ok(web::Json(state.admin.statistics().await?))
}

/// Report API and storage health. Storage failures are reported in the body;
/// the endpoint itself always answers 200.
#[utoipa::path(
    get,
    path = "/api/admin/health",
    responses((status = 200, description = "System health", body = SystemHealthSchema)),
    tags = ["admin"],
    operation_id = "getSystemHealth"
)]
#[get("/admin/health")]
pub async fn system_health(state: web::Data<HttpState>) -> web::Json<SystemHealth> {
    web::Json(state.admin.system_health().await)
}

/// Activate or deactivate many users. Each id is handled independently.
#[utoipa::path(
    patch,
    path = "/api/admin/users/bulk-status",
    request_body = BulkUserStatusBody,
    responses(
        (status = 200, description = "Per-user outcome", body = BulkUpdateOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "bulkUpdateUserStatus"
)]
#[patch("/admin/users/bulk-status")]
pub async fn bulk_update_user_status(
    state: web::Data<HttpState>,
    payload: web::Json<BulkUserStatusBody>,
) -> ApiResult<web::Json<BulkUpdateOutcome>> {
    let request = parse_bulk_request(payload.into_inner())?;
    Ok(web::Json(
        state.admin_command.bulk_update_user_status(request).await,
    ))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::ComponentStatus;
    use crate::inbound::http::test_utils::{MockPorts, detail_code, test_app};
    use crate::test_support::fixture_timestamp;

    #[rstest]
    #[actix_web::test]
    async fn statistics_use_camel_case_fields() {
        let mut ports = MockPorts::default();
        ports.admin.expect_statistics().return_once(|| {
            Ok(SystemStatistics {
                total_users: 2,
                active_users: 1,
                inactive_users: 1,
                total_courses: 3,
                required_courses: 2,
                optional_courses: 1,
                total_enrollments: 3,
                pending_enrollments: 1,
                active_enrollments: 1,
                completed_enrollments: 1,
                cancelled_enrollments: 0,
                completion_rate: 33.3,
            })
        });
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::get().uri("/api/admin/statistics").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalUsers"], 2);
        assert_eq!(body["requiredCourses"], 2);
        assert_eq!(body["completionRate"], 33.3);
    }

    #[rstest]
    #[actix_web::test]
    async fn unhealthy_database_still_answers_200() {
        let mut ports = MockPorts::default();
        ports.admin.expect_system_health().return_once(|| SystemHealth {
            api_status: ComponentStatus::Healthy,
            database_status: ComponentStatus::Unhealthy,
            database_error: Some("connection refused".to_owned()),
            timestamp: fixture_timestamp(),
        });
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::get().uri("/api/admin/health").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["apiStatus"], "Healthy");
        assert_eq!(body["databaseStatus"], "Unhealthy");
        assert_eq!(body["databaseError"], "connection refused");
    }

    #[rstest]
    #[actix_web::test]
    async fn bulk_update_forwards_parsed_ids() {
        let first = UserId::random();
        let second = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .admin_command
            .expect_bulk_update_user_status()
            .withf(move |req| req.user_ids == vec![first, second] && !req.is_active)
            .return_once(move |_| {
                let mut outcome = BulkUpdateOutcome::new(2);
                outcome.record_success();
                outcome.record_failure(format!("User {second} not found"));
                outcome
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::patch()
            .uri("/api/admin/users/bulk-status")
            .set_json(json!({"userIds": [first, second], "isActive": false}))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalRequested"], 2);
        assert_eq!(body["successCount"], 1);
        assert_eq!(body["failedCount"], 1);
        assert_eq!(body["errors"][0], format!("User {second} not found"));
    }

    #[rstest]
    #[case(json!({"isActive": true}), "missing_field")]
    #[case(json!({"userIds": []}), "missing_field")]
    #[case(json!({"userIds": ["nope"], "isActive": true}), "invalid_uuid")]
    #[actix_web::test]
    async fn bulk_update_rejects_bad_bodies(#[case] payload: Value, #[case] code: &str) {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;

        let req = actix_test::TestRequest::patch()
            .uri("/api/admin/users/bulk-status")
            .set_json(payload)
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(detail_code(&body), Some(code));
    }
}

//! Admin reporting and bulk operations.
//!
//! Built on the resource driving ports rather than the repositories, so the
//! same uniqueness and not-found rules apply to admin writes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::{error, info, warn};

use crate::domain::ports::{
    AdminCommand, AdminQuery, BulkUpdateOutcome, BulkUserStatusRequest, ComponentStatus,
    CoursesQuery, EnrollmentsQuery, SystemHealth, SystemStatistics, UpdateUserRequest,
    UserDetail, UsersCommand, UsersQuery,
};
use crate::domain::{
    EmailAddress, EnrollmentStatus, Error, ErrorCode, PersonName, UserId, UserProfile,
};

/// Largest page fetched per collection when computing statistics.
///
/// Flag and status tallies only see this many records; totals always come
/// from the repository count.
pub const STATISTICS_SAMPLE_LIMIT: i64 = 1000;

/// Admin service over the resource driving ports.
#[derive(Clone)]
pub struct AdminService {
    users: Arc<dyn UsersQuery>,
    user_commands: Arc<dyn UsersCommand>,
    courses: Arc<dyn CoursesQuery>,
    enrollments: Arc<dyn EnrollmentsQuery>,
    clock: Arc<dyn Clock>,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UsersQuery>,
        user_commands: Arc<dyn UsersCommand>,
        courses: Arc<dyn CoursesQuery>,
        enrollments: Arc<dyn EnrollmentsQuery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            user_commands,
            courses,
            enrollments,
            clock,
        }
    }

    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> Result<(), String> {
        let detail = match self.users.get_user(user_id).await {
            Ok(detail) => detail,
            Err(err) if err.code() == ErrorCode::NotFound => {
                return Err(format!("User {user_id} not found"));
            }
            Err(err) => return Err(format!("User {user_id}: {}", err.message())),
        };
        let profile = profile_with_flag(&detail, is_active)
            .map_err(|err| format!("User {user_id}: {}", err.message()))?;
        self.user_commands
            .update_user(UpdateUserRequest { user_id, profile })
            .await
            .map(|_| ())
            .map_err(|err| format!("User {user_id}: {}", err.message()))
    }
}

fn profile_with_flag(detail: &UserDetail, is_active: bool) -> Result<UserProfile, Error> {
    let email = EmailAddress::new(detail.email.as_str())
        .map_err(|err| Error::internal(format!("stored email is invalid: {err}")))?;
    Ok(UserProfile {
        email,
        name: PersonName::from_parts(detail.first_name.as_str(), detail.last_name.as_str()),
        is_active,
    })
}

fn count_where<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> u64 {
    items.iter().filter(|item| predicate(item)).count() as u64
}

fn warn_if_truncated<T>(collection: &'static str, page: &Paginated<T>) {
    if page.total_count > page.items.len() as u64 {
        warn!(
            collection,
            total = page.total_count,
            sampled = page.items.len(),
            "statistics computed over a truncated sample"
        );
    }
}

/// `completed / total * 100`, rounded half-to-even to one decimal place.
fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    (percent * 10.0).round_ties_even() / 10.0
}

#[async_trait]
impl AdminQuery for AdminService {
    async fn statistics(&self) -> Result<SystemStatistics, Error> {
        let sample = PageRequest::new(1, STATISTICS_SAMPLE_LIMIT);
        let users = self.users.list_users(sample).await?;
        let courses = self.courses.list_courses(sample).await?;
        let enrollments = self.enrollments.list_enrollments(sample).await?;
        warn_if_truncated("users", &users);
        warn_if_truncated("courses", &courses);
        warn_if_truncated("enrollments", &enrollments);

        let with_status = |status: EnrollmentStatus| {
            count_where(&enrollments.items, |enrollment| enrollment.status == status)
        };
        let completed = with_status(EnrollmentStatus::Completed);

        Ok(SystemStatistics {
            total_users: users.total_count,
            active_users: count_where(&users.items, |user| user.is_active),
            inactive_users: count_where(&users.items, |user| !user.is_active),
            total_courses: courses.total_count,
            required_courses: count_where(&courses.items, |course| course.is_required),
            optional_courses: count_where(&courses.items, |course| !course.is_required),
            total_enrollments: enrollments.total_count,
            pending_enrollments: with_status(EnrollmentStatus::Pending),
            active_enrollments: with_status(EnrollmentStatus::Active),
            completed_enrollments: completed,
            cancelled_enrollments: with_status(EnrollmentStatus::Cancelled),
            completion_rate: completion_rate(completed, enrollments.total_count),
        })
    }

    async fn system_health(&self) -> SystemHealth {
        let probe = self.users.list_users(PageRequest::new(1, 1)).await;
        let (database_status, database_error) = match probe {
            Ok(_) => (ComponentStatus::Healthy, None),
            Err(err) => {
                error!(code = ?err.code(), message = err.message(), "database health check failed");
                (ComponentStatus::Unhealthy, Some(err.message().to_owned()))
            }
        };
        SystemHealth {
            api_status: ComponentStatus::Healthy,
            database_status,
            database_error,
            timestamp: self.clock.utc(),
        }
    }
}

#[async_trait]
impl AdminCommand for AdminService {
    async fn bulk_update_user_status(&self, request: BulkUserStatusRequest) -> BulkUpdateOutcome {
        let BulkUserStatusRequest {
            user_ids,
            is_active,
        } = request;
        info!(count = user_ids.len(), is_active, "bulk updating user status");
        let mut outcome = BulkUpdateOutcome::new(user_ids.len());
        for user_id in user_ids {
            match self.set_user_active(user_id, is_active).await {
                Ok(()) => outcome.record_success(),
                Err(message) => {
                    warn!(user_id = %user_id, %message, "bulk status update failed");
                    outcome.record_failure(message);
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;

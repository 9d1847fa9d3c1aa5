//! Builders for the HTTP state and storage probe of each persistence mode.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use training_tracker::domain::ports::{
    CourseRepository, EnrollmentRepository, StorageProbe, UserRepository,
};
use training_tracker::domain::{AdminService, CourseService, EnrollmentService, UserService};
use training_tracker::inbound::http::state::HttpState;
use training_tracker::outbound::memory::{
    MemoryCourseRepository, MemoryEnrollmentRepository, MemoryStorageProbe, MemoryUserRepository,
    seed_demo_data,
};
use training_tracker::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselEnrollmentRepository, DieselStorageProbe,
    DieselUserRepository, PoolConfig, run_pending_migrations,
};
use training_tracker::settings::Persistence;

/// HTTP state together with the probe readiness checks consult.
pub(crate) struct StorageBackend {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) storage_probe: Arc<dyn StorageProbe>,
}

/// Wire the domain services over one set of repositories.
fn build_http_state<U, C, E>(
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EnrollmentRepository + 'static,
{
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

async fn build_in_memory(seed: bool, clock: Arc<dyn Clock>) -> io::Result<StorageBackend> {
    let users = Arc::new(MemoryUserRepository::new(Arc::clone(&clock)));
    let courses = Arc::new(MemoryCourseRepository::new(Arc::clone(&clock)));
    let enrollments = Arc::new(MemoryEnrollmentRepository::new());

    if seed {
        seed_demo_data(users.as_ref(), courses.as_ref())
            .await
            .map_err(|err| io::Error::other(format!("demo data seeding failed: {err}")))?;
    }

    info!(mode = "in_memory", seeded = seed, "storage backend ready");
    Ok(StorageBackend {
        http_state: web::Data::new(build_http_state(users, courses, enrollments, clock)),
        storage_probe: Arc::new(MemoryStorageProbe),
    })
}

async fn build_postgres(
    database_url: &str,
    max_connections: u32,
    run_migrations: bool,
    clock: Arc<dyn Clock>,
) -> io::Result<StorageBackend> {
    let config = PoolConfig::new(database_url).with_max_size(max_connections);
    if run_migrations {
        run_pending_migrations(config.database_url())
            .await
            .map_err(|err| io::Error::other(format!("database migrations failed: {err}")))?;
    }
    let pool = DbPool::new(&config)
        .map_err(|err| io::Error::other(format!("database pool setup failed: {err}")))?;

    info!(
        mode = "postgres",
        url = %config.redacted_url(),
        max_connections = config.max_size(),
        "storage backend ready"
    );
    Ok(StorageBackend {
        http_state: web::Data::new(build_http_state(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCourseRepository::new(pool.clone())),
            Arc::new(DieselEnrollmentRepository::new(pool.clone())),
            clock,
        )),
        storage_probe: Arc::new(DieselStorageProbe::new(pool)),
    })
}

/// Build the storage backend selected by configuration.
///
/// # Errors
/// Returns [`io::Error`] when seeding, migrations or pool setup fail.
pub(crate) async fn build_storage_backend(
    persistence: &Persistence,
) -> io::Result<StorageBackend> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match persistence {
        Persistence::InMemory { seed_demo_data } => build_in_memory(*seed_demo_data, clock).await,
        Persistence::Postgres {
            database_url,
            max_connections,
            run_migrations,
        } => build_postgres(database_url, *max_connections, *run_migrations, clock).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagination::PageRequest;
    use rstest::rstest;
    use training_tracker::domain::ports::{CoursesQuery, StorageStatus, UsersQuery};

    #[rstest]
    #[case(true, 2, 3)]
    #[case(false, 0, 0)]
    #[tokio::test]
    async fn in_memory_backend_seeds_on_request(
        #[case] seed: bool,
        #[case] users: u64,
        #[case] courses: u64,
    ) {
        let backend = build_storage_backend(&Persistence::InMemory {
            seed_demo_data: seed,
        })
        .await
        .expect("in-memory backend");

        let user_page = backend
            .http_state
            .users
            .list_users(PageRequest::default())
            .await
            .expect("list users");
        let course_page = backend
            .http_state
            .courses
            .list_courses(PageRequest::default())
            .await
            .expect("list courses");

        assert_eq!(user_page.total_count, users);
        assert_eq!(course_page.total_count, courses);
        assert_eq!(
            backend.storage_probe.check().await,
            StorageStatus::NotApplicable
        );
    }
}

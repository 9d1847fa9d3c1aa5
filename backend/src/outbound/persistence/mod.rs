//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between the row structs in `models`
//! and the domain aggregates; they hold no business rules. Connections come
//! from a shared `bb8` pool via `diesel-async`. Every Diesel or pool failure
//! is mapped onto the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use training_tracker::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(&PoolConfig::new("postgres://localhost/training"))?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_error_mapping;
mod diesel_storage_probe;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_storage_probe::DieselStorageProbe;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

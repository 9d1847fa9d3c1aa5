//! Diesel and pool error mapping shared by the training repositories.
//!
//! Every repository port error has `Connection`, `Query` and `Duplicate`
//! variants; callers pass the matching constructors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Port error constructors for one repository.
pub(crate) struct ErrorKinds<E> {
    pub connection: fn(String) -> E,
    pub query: fn(String) -> E,
    pub duplicate: fn(String) -> E,
}

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error<E>(error: PoolError, kinds: &ErrorKinds<E>) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    (kinds.connection)(message)
}

/// Map a Diesel failure onto the port error variants.
///
/// Unique violations carry the constraint name so callers can log it.
pub(crate) fn map_diesel_error<E>(error: DieselError, kinds: &ErrorKinds<E>) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            (kinds.duplicate)(info.constraint_name().unwrap_or("unique constraint").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (kinds.connection)("database connection error".to_owned())
        }
        DieselError::NotFound => (kinds.query)("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => (kinds.query)("database query error".to_owned()),
        _ => (kinds.query)("database error".to_owned()),
    }
}

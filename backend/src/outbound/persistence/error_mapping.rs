//! Shared classification of Diesel failures.
//!
//! Repositories match on [`DatabaseFailure`] to build their own port errors,
//! so the logging and the driver-specific variant matching live in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Database failure reduced to the cases repositories distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DatabaseFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique index rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key rejected the write.
    ForeignKeyViolation,
    /// Anything else.
    Query(&'static str),
}

impl DatabaseFailure {
    /// Whether a unique violation came from `constraint`, or from an unnamed
    /// constraint.
    pub(crate) fn is_unique_violation_of(&self, constraint: &str) -> bool {
        match self {
            Self::UniqueViolation { constraint: None } => true,
            Self::UniqueViolation {
                constraint: Some(name),
            } => name == constraint,
            _ => false,
        }
    }
}

/// Log and classify a Diesel error.
pub(crate) fn classify(error: DieselError) -> DatabaseFailure {
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
        DieselError::NotFound => DatabaseFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DatabaseFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DatabaseFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DatabaseFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DatabaseFailure::ForeignKeyViolation
        }
        _ => DatabaseFailure::Query("database error"),
    }
}

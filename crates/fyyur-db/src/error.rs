//! Directory error types.

use std::fmt;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
    Genre,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Venue => "venue",
            EntityKind::Artist => "artist",
            EntityKind::Show => "show",
            EntityKind::Genre => "genre",
        })
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i32 },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl DirectoryError {
    pub fn not_found(entity: EntityKind, id: i32) -> Self {
        DirectoryError::NotFound { entity, id }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DirectoryError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<DbErr> for DirectoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return DirectoryError::ConstraintViolation(msg);
            }
            _ => {}
        }
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                DirectoryError::StoreUnavailable(err.to_string())
            }
            other => DirectoryError::Database(other),
        }
    }
}

pub type Result<T, E = DirectoryError> = std::result::Result<T, E>;

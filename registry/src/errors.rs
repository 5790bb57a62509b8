//! Custom error types for the mail server registry
//!
//! Provides structured error handling for the store and the HTTP layer. Each
//! `RegistryError` maps to exactly one status code and one envelope error code.

use std::fmt;

/// Main error type for registry operations
#[derive(Debug)]
pub enum RegistryError {
    /// Required input missing or malformed
    Validation { reason: String },

    /// Empty or whitespace-only server id in the request path
    MissingId,

    /// No record for the given key
    NotFound { server_id: String },

    /// Record vanished between the existence check and the update
    UpdateFailed { server_id: String },

    /// Record vanished between the existence check and the delete
    DeleteFailed { server_id: String },

    /// Database operation errors
    Store(DatabaseError),
}

/// Database error variants
#[derive(Debug)]
pub enum DatabaseError {
    /// Connection failed
    ConnectionFailed { reason: String },

    /// Unique or check constraint rejected the write
    ConstraintViolation { reason: String },

    /// Query execution failed
    QueryFailed { reason: String },

    /// A stored value could not be decoded into its record field
    SerializationError { reason: String },
}

impl RegistryError {
    pub fn validation(reason: impl Into<String>) -> Self {
        RegistryError::Validation {
            reason: reason.into(),
        }
    }

    /// Envelope error code reported to clients
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::Validation { .. } => "VALIDATION_ERROR",
            RegistryError::MissingId => "MISSING_ID",
            RegistryError::NotFound { .. } => "NOT_FOUND",
            RegistryError::UpdateFailed { .. } => "UPDATE_FAILED",
            RegistryError::DeleteFailed { .. } => "DELETE_FAILED",
            RegistryError::Store(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RegistryError::UpdateFailed { .. }
                | RegistryError::DeleteFailed { .. }
                | RegistryError::Store(_)
        )
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Validation { reason } => write!(f, "{}", reason),
            RegistryError::MissingId => write!(f, "Missing serverId parameter"),
            RegistryError::NotFound { server_id } => {
                write!(f, "Mail server '{}' not found", server_id)
            }
            RegistryError::UpdateFailed { server_id } => {
                write!(f, "Failed to update mail server '{}'", server_id)
            }
            RegistryError::DeleteFailed { server_id } => {
                write!(f, "Failed to delete mail server '{}'", server_id)
            }
            RegistryError::Store(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::ConnectionFailed { reason } => {
                write!(f, "Database connection failed: {}", reason)
            }
            DatabaseError::ConstraintViolation { reason } => {
                write!(f, "Constraint violation: {}", reason)
            }
            DatabaseError::QueryFailed { reason } => write!(f, "Query failed: {}", reason),
            DatabaseError::SerializationError { reason } => {
                write!(f, "Serialization error: {}", reason)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
impl std::error::Error for DatabaseError {}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation() || db_err.is_check_violation() =>
            {
                DatabaseError::ConstraintViolation {
                    reason: db_err.message().to_string(),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionFailed {
                    reason: err.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::SerializationError {
                    reason: err.to_string(),
                }
            }
            _ => DatabaseError::QueryFailed {
                reason: err.to_string(),
            },
        }
    }
}

impl From<DatabaseError> for RegistryError {
    fn from(err: DatabaseError) -> Self {
        RegistryError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_per_variant() {
        assert_eq!(RegistryError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(RegistryError::MissingId.code(), "MISSING_ID");
        assert_eq!(
            RegistryError::NotFound {
                server_id: "MAIL-1".into()
            }
            .code(),
            "NOT_FOUND"
        );
        assert_eq!(
            RegistryError::DeleteFailed {
                server_id: "MAIL-1".into()
            }
            .code(),
            "DELETE_FAILED"
        );
        assert_eq!(
            RegistryError::Store(DatabaseError::QueryFailed {
                reason: "boom".into()
            })
            .code(),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = RegistryError::NotFound {
            server_id: "MAIL-ABCD1234".into(),
        };
        assert_eq!(err.to_string(), "Mail server 'MAIL-ABCD1234' not found");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_race_failures_are_internal() {
        assert!(RegistryError::UpdateFailed {
            server_id: "a".into()
        }
        .is_internal());
        assert!(RegistryError::DeleteFailed {
            server_id: "a".into()
        }
        .is_internal());
    }
}

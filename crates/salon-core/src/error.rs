//! # Error Types
//!
//! Rejection signals and validation errors for salon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salon-core errors (this file)                                         │
//! │  ├── CoreError        - Rejected actions (duplicate email, bad login)  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  salon-db errors (separate crate)                                      │
//! │  └── DbError          - Persistence failures (never fed back into      │
//! │                         the dispatch path; logged and dropped)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Rejections are return values, never panics: the slice leaves prior
//!    state untouched and the caller decides what to show
//! 3. Not-found update/delete is NOT an error - those are silent no-ops

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Rejection signals raised by slice operations.
///
/// Each variant corresponds to an action the store refuses to apply. State is
/// guaranteed untouched when one of these is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Registration attempted with an email that already has an account.
    #[error("email '{0}' is already registered")]
    EmailAlreadyRegistered(String),

    /// Registration attempted with an id that already identifies a user.
    ///
    /// Ids are caller-supplied at registration time, so collisions must be
    /// rejected rather than silently overwriting an existing account.
    #[error("user id {0} is already taken")]
    UserIdTaken(i64),

    /// Login attempted with no matching (email, password) pair.
    ///
    /// The session keeps whatever state it had before the attempt; the
    /// caller distinguishes "still logged out" from "wrong credentials"
    /// through this signal.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A booking with this id already exists.
    ///
    /// Uniqueness is enforced at insert time, which keeps update-by-id and
    /// delete-by-id semantics unambiguous.
    #[error("a booking with id {0} already exists")]
    DuplicateBookingId(i64),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before an action touches slice state.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::EmailAlreadyRegistered("a@x.com".to_string());
        assert_eq!(err.to_string(), "email 'a@x.com' is already registered");

        let err = CoreError::DuplicateBookingId(7);
        assert_eq!(err.to_string(), "a booking with id 7 already exists");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("username");
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::MustBePositive {
            field: "persons".to_string(),
        };
        assert_eq!(err.to_string(), "persons must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::required("email");
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

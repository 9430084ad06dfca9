//! # Store Error Types
//!
//! The store surfaces two failure families to its caller: rejection signals
//! from the slices (duplicate email, bad credentials, duplicate booking id)
//! and startup failures from the persistence layer. Durability failures
//! *after* startup are deliberately absent here - the writer task logs and
//! drops them, per the fire-and-forget contract.

use thiserror::Error;

use salon_core::CoreError;
use salon_db::DbError;

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A slice rejected the action; state is untouched.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The persistence layer failed while opening the store.
    #[error("persistence error: {0}")]
    Db(#[from] DbError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::InvalidCredentials.into();
        assert_eq!(err.to_string(), "invalid email or password");
    }
}

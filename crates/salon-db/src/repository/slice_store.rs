//! # Slice Store Repository
//!
//! Database operations for the `slice_store` key-value table.
//!
//! ## Persisted Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       slice_store                                       │
//! │                                                                         │
//! │  slice (PK)  │  state (JSON blob)                  │  updated_at        │
//! │  ────────────┼─────────────────────────────────────┼─────────────────   │
//! │  "users"     │  {"users":[...],"currentUser":...}  │  2025-03-14T...    │
//! │  "messages"  │  {"messages":[...],"services":...}  │  2025-03-14T...    │
//! │                                                                         │
//! │  One row per wrapped slice; every save is a full-state upsert, not a   │
//! │  diff. There is no schema version tag on the blob: the hydration path  │
//! │  treats an unreadable blob as absent.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for slice snapshot storage.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SliceStoreRepository::new(pool);
/// repo.save("users", &json).await?;
/// let blob = repo.load("users").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SliceStoreRepository {
    pool: SqlitePool,
}

impl SliceStoreRepository {
    /// Creates a new SliceStoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SliceStoreRepository { pool }
    }

    /// Loads the serialized state for a slice.
    ///
    /// ## Returns
    /// * `Ok(Some(json))` - A snapshot exists for this slice key
    /// * `Ok(None)` - Nothing persisted yet (first run)
    pub async fn load(&self, slice: &str) -> DbResult<Option<String>> {
        debug!(slice = %slice, "Loading slice snapshot");

        let state: Option<String> =
            sqlx::query_scalar("SELECT state FROM slice_store WHERE slice = ?1")
                .bind(slice)
                .fetch_optional(&self.pool)
                .await?;

        Ok(state)
    }

    /// Upserts the serialized state for a slice.
    ///
    /// The whole blob is replaced on every call; `updated_at` records the
    /// write time for diagnostics.
    pub async fn save(&self, slice: &str, state: &str) -> DbResult<()> {
        debug!(slice = %slice, bytes = state.len(), "Saving slice snapshot");

        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO slice_store (slice, state, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slice) DO UPDATE SET
                state = excluded.state,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(slice)
        .bind(state)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a slice's snapshot. No-op when the key is absent.
    pub async fn delete(&self, slice: &str) -> DbResult<bool> {
        debug!(slice = %slice, "Deleting slice snapshot");

        let result = sqlx::query("DELETE FROM slice_store WHERE slice = ?1")
            .bind(slice)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the slice keys that currently have a snapshot.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT slice FROM slice_store ORDER BY slice")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Selectors
//!
//! Pure read functions over slice state, plus the memoized
//! bookings-by-user selector.
//!
//! ## Memoization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 BookingsByUser Memoization                              │
//! │                                                                         │
//! │  select(state, 3)                                                       │
//! │       │                                                                 │
//! │       ├── messages Arc same as cached?  ──┐                             │
//! │       ├── user_id  same as cached?      ──┤                             │
//! │       │                                   ▼                             │
//! │       │                          YES: return cached Arc                 │
//! │       │                               (identical allocation)            │
//! │       ▼                                                                 │
//! │      NO: filter, cache (messages, user_id, result), return             │
//! │                                                                         │
//! │  Invalidation is automatic: every bookings mutation swaps in a fresh   │
//! │  Arc, so the pointer comparison fails exactly when the collection      │
//! │  changed.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::slice::BookingsState;
use crate::types::Booking;

// =============================================================================
// Filtered Bookings
// =============================================================================

/// Bookings whose name or date contains the slice's search term,
/// case-insensitively. Computed at selection time; an empty term selects
/// everything.
pub fn filtered_bookings(state: &BookingsState) -> Vec<Booking> {
    let needle = state.search_term().to_lowercase();
    state
        .messages()
        .iter()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.date.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

// =============================================================================
// Bookings By User
// =============================================================================

/// Cached inputs and output of the last `select` call.
#[derive(Debug)]
struct Memo {
    messages: Arc<Vec<Booking>>,
    user_id: i64,
    result: Arc<Vec<Booking>>,
}

/// Memoized selector: all bookings owned by one user, in insertion order.
///
/// The cache is keyed on the message collection's pointer identity and the
/// user id. While neither changes, `select` returns the *same* `Arc` - not
/// just an equal value - so downstream reference-equality checks (and any
/// memoization stacked on top) hold.
///
/// ## Usage
/// ```rust
/// use salon_core::{BookingsByUser, BookingsState};
///
/// let state = BookingsState::new();
/// let selector = BookingsByUser::new();
///
/// let a = selector.select(&state, 3);
/// let b = selector.select(&state, 3);
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct BookingsByUser {
    memo: Mutex<Option<Memo>>,
}

impl BookingsByUser {
    /// Creates a selector with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the bookings whose `user_id` matches, order-preserving.
    pub fn select(&self, state: &BookingsState, user_id: i64) -> Arc<Vec<Booking>> {
        let messages = state.messages();

        // A poisoned memo only means a past panic mid-recompute; the cell
        // contents are still a plain value, safe to reuse or overwrite.
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = memo.as_ref() {
            if cached.user_id == user_id && Arc::ptr_eq(&cached.messages, &messages) {
                return Arc::clone(&cached.result);
            }
        }

        let result: Arc<Vec<Booking>> = Arc::new(
            messages
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect(),
        );

        *memo = Some(Memo {
            messages,
            user_id,
            result: Arc::clone(&result),
        });

        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Bookings Slice
//!
//! Owns the booking collection ("messages"), the bookings search term, and
//! the static service catalog.
//!
//! ## Id Policy
//! Booking ids are generated by the submitting layer, and uniqueness is
//! enforced here at insert time. That keeps the two removal shapes coherent:
//! update replaces the (single) match, delete filters every match - with
//! unique ids those can never disagree.
//!
//! ## Search
//! Unlike the users slice, the filtered view is not stored: the term lives
//! here and filtering over name/date happens in the selector layer at
//! selection time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{Booking, Service};
use crate::validation;

/// State of the bookings slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsState {
    messages: Arc<Vec<Booking>>,

    search_term: String,

    /// Static seed catalog; read-only at runtime but carried in state so a
    /// persisted snapshot is self-contained.
    services: Arc<Vec<Service>>,
}

impl Default for BookingsState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingsState {
    /// Creates the initial state: no bookings, seeded service catalog.
    pub fn new() -> Self {
        BookingsState {
            messages: Arc::new(Vec::new()),
            search_term: String::new(),
            services: Arc::new(catalog::default_services()),
        }
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Snapshot of all bookings in insertion order.
    pub fn messages(&self) -> Arc<Vec<Booking>> {
        Arc::clone(&self.messages)
    }

    /// The active bookings search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Snapshot of the service catalog.
    pub fn services(&self) -> Arc<Vec<Service>> {
        Arc::clone(&self.services)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a booking.
    ///
    /// ## Behavior
    /// - Rejects invalid input (empty name/date, zero persons)
    /// - Rejects an id that already exists (collection untouched)
    pub fn add_booking(&mut self, booking: Booking) -> CoreResult<()> {
        validation::validate_booking(&booking)?;

        if self.messages.iter().any(|m| m.id == booking.id) {
            return Err(CoreError::DuplicateBookingId(booking.id));
        }

        let mut next = self.messages.as_ref().clone();
        next.push(booking);
        self.messages = Arc::new(next);
        Ok(())
    }

    /// Replaces the booking whose id matches `booking.id` in place.
    ///
    /// Silent no-op when absent; returns whether anything changed.
    pub fn update_booking(&mut self, booking: Booking) -> bool {
        let Some(index) = self.messages.iter().position(|m| m.id == booking.id) else {
            return false;
        };

        let mut next = self.messages.as_ref().clone();
        next[index] = booking;
        self.messages = Arc::new(next);
        true
    }

    /// Removes every booking with the given id (filter semantics).
    ///
    /// With insert-time uniqueness this can only ever remove one entry, but
    /// the filter shape is kept: a snapshot hydrated from an older persisted
    /// blob could still carry duplicates.
    pub fn delete_booking(&mut self, id: i64) -> bool {
        if !self.messages.iter().any(|m| m.id == id) {
            return false;
        }

        let next: Vec<Booking> = self
            .messages
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();
        self.messages = Arc::new(next);
        true
    }

    /// Stores the bookings search term. Filtering happens at selection time.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_booking(id: i64, user_id: i64, services: &[&str]) -> Booking {
        Booking {
            id,
            name: format!("Booking {}", id),
            date: "2025-03-14".to_string(),
            persons: 2,
            desc: "evening slot".to_string(),
            services: services.iter().map(|s| s.to_string()).collect(),
            user_id,
            email: "owner@x.com".to_string(),
        }
    }

    #[test]
    fn test_new_state_carries_seeded_catalog() {
        let state = BookingsState::new();
        assert!(state.messages().is_empty());
        assert_eq!(state.services().len(), catalog::SERVICE_COUNT);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut state = BookingsState::new();
        state.add_booking(test_booking(7, 3, &["Hair Care"])).unwrap();
        state.add_booking(test_booking(2, 3, &["Waxing"])).unwrap();

        let ids: Vec<i64> = state.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![7, 2]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut state = BookingsState::new();
        state.add_booking(test_booking(7, 3, &[])).unwrap();

        let err = state.add_booking(test_booking(7, 4, &[])).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateBookingId(7)));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_zero_persons_rejected() {
        let mut state = BookingsState::new();
        let mut booking = test_booking(1, 1, &[]);
        booking.persons = 0;

        assert!(state.add_booking(booking).is_err());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_update_replaces_matching_entry() {
        let mut state = BookingsState::new();
        state
            .add_booking(test_booking(7, 3, &["Hair Care", "Waxing"]))
            .unwrap();

        let mut updated = test_booking(7, 3, &["Hair Care"]);
        updated.persons = 4;
        assert!(state.update_booking(updated));

        let messages = state.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].persons, 4);
        assert_eq!(messages[0].services_label(), "Hair Care");
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut state = BookingsState::new();
        state.add_booking(test_booking(7, 3, &[])).unwrap();

        assert!(!state.update_booking(test_booking(99, 3, &[])));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut state = BookingsState::new();
        state.add_booking(test_booking(7, 3, &[])).unwrap();
        state.add_booking(test_booking(8, 3, &[])).unwrap();

        assert!(state.delete_booking(7));
        assert!(!state.delete_booking(7));
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].id, 8);
    }

    #[test]
    fn test_old_snapshot_unchanged_by_delete() {
        let mut state = BookingsState::new();
        state.add_booking(test_booking(7, 3, &[])).unwrap();

        let before = state.messages();
        state.delete_booking(7);

        assert_eq!(before.len(), 1);
        assert!(state.messages().is_empty());
    }
}

//! # Carts Slice
//!
//! Owns the mapping from user identity to that user's ordered cart lines.
//!
//! There is no "global" cart: every operation is keyed by `user_id`. The
//! slice performs no user-existence check - gating cart actions on
//! authentication is the calling layer's job - so it will happily hold a
//! cart for an id the user collection has never seen.
//!
//! ## Invariant
//! Within one user's cart, line ids are unique. Adding an id that is already
//! present accumulates `quantity` on the existing line instead of appending
//! a second row; insertion order of distinct lines is preserved.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::CartItem;

/// State of the carts slice: one ordered line collection per user.
///
/// This slice is not persisted (only the users and bookings slices are
/// written through to storage), so a restart starts every cart empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartsState {
    user_carts: HashMap<i64, Arc<Vec<CartItem>>>,
}

impl CartsState {
    /// Creates the empty initial state: no user has a cart.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Snapshot of one user's cart. Empty for a user with no cart.
    pub fn cart_for(&self, user_id: i64) -> Arc<Vec<CartItem>> {
        self.user_carts
            .get(&user_id)
            .map(Arc::clone)
            .unwrap_or_default()
    }

    /// Total quantity across one user's cart (badge count in the UI).
    pub fn total_quantity(&self, user_id: i64) -> u32 {
        self.cart_for(user_id).iter().map(|i| i.quantity).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces a user's entire cart collection.
    pub fn set_cart_items(&mut self, user_id: i64, items: Vec<CartItem>) {
        self.user_carts.insert(user_id, Arc::new(items));
    }

    /// Adds a line to a user's cart, merging by id.
    ///
    /// ## Behavior
    /// - Same id already present: that line's quantity grows by
    ///   `item.quantity`; no new row appears
    /// - Otherwise: the line is appended
    pub fn add_item(&mut self, user_id: i64, item: CartItem) {
        let current = self.cart_for(user_id);
        let mut next = current.as_ref().clone();

        if let Some(existing) = next.iter_mut().find(|line| line.id == item.id) {
            existing.quantity += item.quantity;
        } else {
            next.push(item);
        }

        self.user_carts.insert(user_id, Arc::new(next));
    }

    /// Filters the line with the given id out of a user's cart.
    pub fn remove_item(&mut self, user_id: i64, item_id: i64) {
        let current = self.cart_for(user_id);
        let next: Vec<CartItem> = current
            .iter()
            .filter(|line| line.id != item_id)
            .cloned()
            .collect();
        self.user_carts.insert(user_id, Arc::new(next));
    }

    /// Empties a user's cart.
    pub fn clear_cart(&mut self, user_id: i64) {
        self.user_carts.insert(user_id, Arc::new(Vec::new()));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: i64, quantity: u32) -> CartItem {
        CartItem {
            id,
            name: format!("Product {}", id),
            price: 24.99,
            image: format!("/p{}.jpg", id),
            quantity,
        }
    }

    #[test]
    fn test_unknown_user_has_empty_cart() {
        let state = CartsState::new();
        assert!(state.cart_for(42).is_empty());
        assert_eq!(state.total_quantity(42), 0);
    }

    #[test]
    fn test_repeat_add_accumulates_quantity() {
        let mut state = CartsState::new();
        state.add_item(1, test_item(10, 1));
        state.add_item(1, test_item(10, 1));

        let cart = state.cart_for(1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 2);
    }

    #[test]
    fn test_distinct_ids_preserve_insertion_order() {
        let mut state = CartsState::new();
        state.add_item(1, test_item(10, 1));
        state.add_item(1, test_item(5, 3));
        state.add_item(1, test_item(10, 2));

        let cart = state.cart_for(1);
        let ids: Vec<i64> = cart.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![10, 5]);
        assert_eq!(cart[0].quantity, 3);
        assert_eq!(state.total_quantity(1), 6);
    }

    #[test]
    fn test_carts_are_isolated_per_user() {
        let mut state = CartsState::new();
        state.add_item(1, test_item(10, 1));
        state.add_item(2, test_item(10, 5));

        assert_eq!(state.cart_for(1)[0].quantity, 1);
        assert_eq!(state.cart_for(2)[0].quantity, 5);
    }

    #[test]
    fn test_remove_then_clear_leaves_empty() {
        let mut state = CartsState::new();
        state.add_item(1, test_item(10, 1));
        state.add_item(1, test_item(5, 2));

        state.remove_item(1, 10);
        assert_eq!(state.cart_for(1).len(), 1);

        state.clear_cart(1);
        assert!(state.cart_for(1).is_empty());

        // Clearing a cart that never existed is also fine.
        state.clear_cart(99);
        assert!(state.cart_for(99).is_empty());
    }

    #[test]
    fn test_set_cart_items_replaces_wholesale() {
        let mut state = CartsState::new();
        state.add_item(1, test_item(10, 1));

        state.set_cart_items(1, vec![test_item(5, 2), test_item(6, 1)]);

        let cart = state.cart_for(1);
        let ids: Vec<i64> = cart.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_adds() {
        let mut state = CartsState::new();
        state.add_item(1, test_item(10, 1));

        let before = state.cart_for(1);
        state.add_item(1, test_item(10, 1));

        assert_eq!(before[0].quantity, 1);
        assert_eq!(state.cart_for(1)[0].quantity, 2);
    }
}

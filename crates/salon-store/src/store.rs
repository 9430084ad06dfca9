//! # The Store
//!
//! Root state composition, hydration, dispatch, and the selector surface.
//!
//! ## Thread Safety
//! The root state sits behind one `Mutex`: every mutation runs to completion
//! under the lock before any other dispatch is processed - no preemption, no
//! interleaving of two mutations. Read methods take the same lock briefly
//! and hand out `Arc` snapshots, so nothing downstream holds the lock while
//! rendering.
//!
//! ## Persistence Wrapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which Slices Are Wrapped?                            │
//! │                                                                         │
//! │   users slice     ──► persisted  (key "users")                          │
//! │   bookings slice  ──► persisted  (key "messages")                       │
//! │   carts slice     ──► NOT persisted: carts reset on restart             │
//! │                                                                         │
//! │   Hydration on open: existing blob replaces the slice's defaults;       │
//! │   absent or unreadable blob → defaults (for bookings that includes      │
//! │   the seeded service catalog).                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use salon_core::selector;
use salon_core::{
    Booking, BookingsByUser, BookingsState, CartItem, CartsState, CoreResult, Service, User,
    UsersState,
};
use salon_db::Database;

use crate::error::StoreResult;
use crate::persist::PersistHandle;

/// Durable record key for the users slice.
const USERS_SLICE: &str = "users";

/// Durable record key for the bookings slice.
const MESSAGES_SLICE: &str = "messages";

/// Upper bound (exclusive) for generated booking ids.
const BOOKING_ID_RANGE: i64 = 1_000_000;

// =============================================================================
// Root State
// =============================================================================

/// The composed root state. Owned exclusively by the store; the UI only ever
/// sees snapshots obtained through selectors.
#[derive(Debug, Default)]
struct RootState {
    users: UsersState,
    bookings: BookingsState,
    carts: CartsState,
}

// =============================================================================
// Store
// =============================================================================

/// The store orchestrator: the single point through which all reads and
/// writes flow.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./salon.db")).await?;
/// let store = Store::open(db).await?;
///
/// store.register_user(user)?;
/// store.login_user("a@x.com", "pw")?;
/// let mine = store.bookings_by_user(3);
/// ```
pub struct Store {
    state: Mutex<RootState>,
    persist: PersistHandle,
    bookings_by_user: BookingsByUser,
}

impl Store {
    /// Opens the store over a database: hydrates the wrapped slices and
    /// spawns the background writer.
    ///
    /// ## Hydration
    /// - A persisted blob replaces the slice's built-in defaults
    /// - No blob (first run) or an unreadable blob → defaults, with the
    ///   unreadable case logged at warn (there is no blob versioning or
    ///   migration; an incompatible snapshot is treated as absent)
    pub async fn open(db: Database) -> StoreResult<Self> {
        let repo = db.slice_store();

        let users: UsersState = hydrate(repo.load(USERS_SLICE).await?, USERS_SLICE);
        let bookings: BookingsState = hydrate(repo.load(MESSAGES_SLICE).await?, MESSAGES_SLICE);

        info!(
            users = users.users().len(),
            bookings = bookings.messages().len(),
            "Store opened"
        );

        Ok(Store {
            state: Mutex::new(RootState {
                users,
                bookings,
                carts: CartsState::new(),
            }),
            persist: PersistHandle::spawn(repo),
            bookings_by_user: BookingsByUser::new(),
        })
    }

    /// Waits until every durability write enqueued so far has been
    /// attempted. For shutdown paths and tests; dispatch never waits.
    pub async fn flush(&self) {
        self.persist.flush().await;
    }

    /// Generates a random booking id, as the submission form does.
    ///
    /// Collisions are possible in principle; `add_booking` rejects them and
    /// the caller simply draws again.
    pub fn next_booking_id(&self) -> i64 {
        rand::thread_rng().gen_range(0..BOOKING_ID_RANGE)
    }

    // =========================================================================
    // Users/Auth Actions
    // =========================================================================

    /// Inserts a user iff the email and id are unused. Does not log in.
    pub fn register_user(&self, user: User) -> CoreResult<()> {
        let mut state = self.lock();
        state.users.register_user(user)?;
        self.persist_users(&state);
        Ok(())
    }

    /// Sets the session on an exact (email, password) match; on failure the
    /// prior session is untouched and the error is the caller's signal.
    pub fn login_user(&self, email: &str, password: &str) -> CoreResult<User> {
        let mut state = self.lock();
        let user = state.users.login_user(email, password)?;
        self.persist_users(&state);
        Ok(user)
    }

    /// Unconditionally clears the session.
    pub fn logout_user(&self) {
        let mut state = self.lock();
        state.users.logout_user();
        self.persist_users(&state);
    }

    /// Replaces the stored record matching `user.id`; no-op if absent.
    pub fn update_user(&self, user: User) {
        let mut state = self.lock();
        if state.users.update_user(user) {
            self.persist_users(&state);
        }
    }

    /// Sets the admin flag on the matching user; no-op if absent.
    pub fn update_user_role(&self, user_id: i64, is_admin: bool) {
        let mut state = self.lock();
        if state.users.update_user_role(user_id, is_admin) {
            self.persist_users(&state);
        }
    }

    /// Overwrites the matching user's profile image; no-op if absent.
    pub fn update_profile_image(&self, id: i64, new_image: String) {
        let mut state = self.lock();
        if state.users.update_profile_image(id, new_image) {
            self.persist_users(&state);
        }
    }

    /// Removes the matching user; no-op if absent. Never cascades and never
    /// touches the session.
    pub fn delete_user(&self, id: i64) {
        let mut state = self.lock();
        if state.users.delete_user(id) {
            self.persist_users(&state);
        }
    }

    /// Stores the users search term and recomputes the filtered view.
    pub fn set_users_search_term(&self, term: impl Into<String>) {
        let mut state = self.lock();
        state.users.set_search_term(term);
        self.persist_users(&state);
    }

    // =========================================================================
    // Booking Actions
    // =========================================================================

    /// Appends a booking; rejects invalid input and duplicate ids.
    pub fn add_booking(&self, booking: Booking) -> CoreResult<()> {
        let mut state = self.lock();
        state.bookings.add_booking(booking)?;
        self.persist_bookings(&state);
        Ok(())
    }

    /// Replaces the booking matching `booking.id`; no-op if absent.
    pub fn update_booking(&self, booking: Booking) {
        let mut state = self.lock();
        if state.bookings.update_booking(booking) {
            self.persist_bookings(&state);
        }
    }

    /// Removes every booking with this id; no-op if absent.
    pub fn delete_booking(&self, id: i64) {
        let mut state = self.lock();
        if state.bookings.delete_booking(id) {
            self.persist_bookings(&state);
        }
    }

    /// Stores the bookings search term (filtering happens in selectors).
    pub fn set_bookings_search_term(&self, term: impl Into<String>) {
        let mut state = self.lock();
        state.bookings.set_search_term(term);
        self.persist_bookings(&state);
    }

    // =========================================================================
    // Cart Actions
    // =========================================================================
    // The carts slice is not wrapped by persistence and performs no
    // user-existence check; gating cart actions on authentication is the
    // calling layer's responsibility.

    /// Replaces a user's entire cart.
    pub fn set_cart_items(&self, user_id: i64, items: Vec<CartItem>) {
        self.lock().carts.set_cart_items(user_id, items);
    }

    /// Adds a line to a user's cart, accumulating quantity on a repeated id.
    pub fn add_item_to_cart(&self, user_id: i64, item: CartItem) -> CoreResult<()> {
        salon_core::validation::validate_cart_item(&item)?;
        self.lock().carts.add_item(user_id, item);
        Ok(())
    }

    /// Filters a line out of a user's cart.
    pub fn remove_item_from_cart(&self, user_id: i64, item_id: i64) {
        self.lock().carts.remove_item(user_id, item_id);
    }

    /// Empties a user's cart.
    pub fn clear_cart(&self, user_id: i64) {
        self.lock().carts.clear_cart(user_id);
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Snapshot of the full user collection.
    pub fn users(&self) -> Arc<Vec<User>> {
        self.lock().users.users()
    }

    /// Snapshot of the search-filtered user view.
    pub fn filtered_users(&self) -> Arc<Vec<User>> {
        self.lock().users.filtered_users()
    }

    /// The active users search term.
    pub fn users_search_term(&self) -> String {
        self.lock().users.search_term().to_string()
    }

    /// Value copy of the logged-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.lock().users.current_user().cloned()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.lock().users.is_authenticated()
    }

    /// Snapshot of all bookings in insertion order.
    pub fn messages(&self) -> Arc<Vec<Booking>> {
        self.lock().bookings.messages()
    }

    /// The active bookings search term.
    pub fn bookings_search_term(&self) -> String {
        self.lock().bookings.search_term().to_string()
    }

    /// Bookings whose name or date contains the search term.
    pub fn filtered_bookings(&self) -> Vec<Booking> {
        selector::filtered_bookings(&self.lock().bookings)
    }

    /// Snapshot of the static service catalog.
    pub fn services(&self) -> Arc<Vec<Service>> {
        self.lock().bookings.services()
    }

    /// Memoized: all bookings owned by one user, in insertion order.
    /// Referentially stable while the booking collection and the user id
    /// are unchanged.
    pub fn bookings_by_user(&self, user_id: i64) -> Arc<Vec<Booking>> {
        let state = self.lock();
        self.bookings_by_user.select(&state.bookings, user_id)
    }

    /// Snapshot of one user's cart; empty for a user with no cart.
    pub fn cart_for(&self, user_id: i64) -> Arc<Vec<CartItem>> {
        self.lock().carts.cart_for(user_id)
    }

    /// Total quantity across one user's cart.
    pub fn cart_total_quantity(&self, user_id: i64) -> u32 {
        self.lock().carts.total_quantity(user_id)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> std::sync::MutexGuard<'_, RootState> {
        // A poisoned lock means a panic mid-dispatch; the slices are plain
        // values and every mutation swaps whole collections, so the state
        // is still coherent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_users(&self, state: &RootState) {
        self.persist_slice(USERS_SLICE, &state.users);
    }

    fn persist_bookings(&self, state: &RootState) {
        self.persist_slice(MESSAGES_SLICE, &state.bookings);
    }

    /// Serializes a whole slice and hands it to the writer. Serialization
    /// failure is swallowed like any other persistence failure: the
    /// in-memory mutation has already taken effect and stands.
    fn persist_slice<S: Serialize>(&self, slice: &'static str, value: &S) {
        match serde_json::to_string(value) {
            Ok(json) => {
                debug!(slice, "enqueueing slice snapshot");
                self.persist.enqueue(slice, json);
            }
            Err(err) => warn!(slice, error = %err, "slice snapshot serialization failed"),
        }
    }
}

/// Deserializes a hydration blob, falling back to the slice's defaults when
/// the blob is absent or unreadable.
fn hydrate<S: DeserializeOwned + Default>(blob: Option<String>, slice: &str) -> S {
    match blob {
        None => S::default(),
        Some(json) => match serde_json::from_str(&json) {
            Ok(state) => state,
            Err(err) => {
                warn!(slice, error = %err, "persisted snapshot unreadable; using defaults");
                S::default()
            }
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use salon_core::CoreError;
    use salon_db::DbConfig;

    async fn open_store() -> (Database, Store) {
        // RUST_LOG=debug surfaces writer activity when a test misbehaves.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = Store::open(db.clone()).await.unwrap();
        (db, store)
    }

    fn test_user(id: i64, email: &str, is_admin: bool) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: email.to_string(),
            password: "secret".to_string(),
            phone: "0300-0000000".to_string(),
            profile_image: None,
            is_admin,
        }
    }

    fn test_booking(id: i64, user_id: i64, services: &[&str]) -> Booking {
        Booking {
            id,
            name: format!("Booking {}", id),
            date: "2025-03-14".to_string(),
            persons: 2,
            desc: String::new(),
            services: services.iter().map(|s| s.to_string()).collect(),
            user_id,
            email: "owner@x.com".to_string(),
        }
    }

    fn test_item(id: i64) -> CartItem {
        CartItem {
            id,
            name: format!("Product {}", id),
            price: 19.99,
            image: format!("/p{}.jpg", id),
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_register_login_logout_flow() {
        let (_db, store) = open_store().await;

        store.register_user(test_user(1, "a@x.com", true)).unwrap();
        assert!(!store.is_authenticated());

        let user = store.login_user("a@x.com", "secret").unwrap();
        assert!(user.is_admin);
        assert!(store.is_authenticated());
        assert_eq!(store.current_user().unwrap().email, "a@x.com");

        store.logout_user();
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_rejections_leave_state_untouched() {
        let (_db, store) = open_store().await;
        store.register_user(test_user(1, "a@x.com", false)).unwrap();

        let err = store
            .register_user(test_user(2, "a@x.com", false))
            .unwrap_err();
        assert!(matches!(err, CoreError::EmailAlreadyRegistered(_)));
        assert_eq!(store.users().len(), 1);

        let err = store.login_user("a@x.com", "wrong").unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_users_slice_survives_reopen() {
        let (db, store) = open_store().await;

        store.register_user(test_user(1, "a@x.com", false)).unwrap();
        store.register_user(test_user(2, "b@x.com", true)).unwrap();
        store.login_user("b@x.com", "secret").unwrap();
        store.flush().await;

        let reopened = Store::open(db).await.unwrap();
        assert_eq!(reopened.users().len(), 2);
        // The session rides along in the users slice, so a login survives restart.
        assert!(reopened.is_authenticated());
        assert_eq!(reopened.current_user().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_bookings_slice_survives_reopen() {
        let (db, store) = open_store().await;

        store
            .add_booking(test_booking(7, 3, &["Hair Care", "Waxing"]))
            .unwrap();
        store.flush().await;

        let reopened = Store::open(db).await.unwrap();
        let messages = reopened.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].services_label(), "Hair Care, Waxing");
    }

    #[tokio::test]
    async fn test_carts_do_not_survive_reopen() {
        let (db, store) = open_store().await;

        store.add_item_to_cart(1, test_item(10)).unwrap();
        store.flush().await;

        let reopened = Store::open(db).await.unwrap();
        assert!(reopened.cart_for(1).is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_blob_falls_back_to_defaults() {
        let (db, store) = open_store().await;
        store.register_user(test_user(1, "a@x.com", false)).unwrap();
        store.flush().await;

        db.slice_store()
            .save(MESSAGES_SLICE, "not json at all")
            .await
            .unwrap();

        let reopened = Store::open(db).await.unwrap();
        // Users hydrated; bookings fell back to defaults with the seeded
        // catalog intact.
        assert_eq!(reopened.users().len(), 1);
        assert!(reopened.messages().is_empty());
        assert_eq!(reopened.services().len(), 9);
    }

    #[tokio::test]
    async fn test_double_add_accumulates_quantity() {
        let (_db, store) = open_store().await;

        store.add_item_to_cart(1, test_item(10)).unwrap();
        store.add_item_to_cart(1, test_item(10)).unwrap();

        let cart = store.cart_for(1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_then_clear_always_empty() {
        let (_db, store) = open_store().await;

        store.add_item_to_cart(1, test_item(10)).unwrap();
        store.add_item_to_cart(1, test_item(11)).unwrap();
        store.remove_item_from_cart(1, 10);
        store.clear_cart(1);

        assert!(store.cart_for(1).is_empty());
        assert_eq!(store.cart_total_quantity(1), 0);
    }

    #[tokio::test]
    async fn test_invalid_cart_item_rejected() {
        let (_db, store) = open_store().await;

        let mut item = test_item(10);
        item.quantity = 0;
        assert!(store.add_item_to_cart(1, item).is_err());
        assert!(store.cart_for(1).is_empty());
    }

    #[tokio::test]
    async fn test_bookings_by_user_is_memoized() {
        let (_db, store) = open_store().await;

        store.add_booking(test_booking(1, 3, &[])).unwrap();
        store.add_booking(test_booking(2, 5, &[])).unwrap();
        store.add_booking(test_booking(3, 3, &[])).unwrap();

        let first = store.bookings_by_user(3);
        let second = store.bookings_by_user(3);
        assert!(Arc::ptr_eq(&first, &second));

        let ids: Vec<i64> = first.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);

        store.delete_booking(1);
        let after = store.bookings_by_user(3);
        assert!(!Arc::ptr_eq(&second, &after));
        assert_eq!(after.len(), 1);
    }

    #[tokio::test]
    async fn test_update_booking_narrows_services() {
        let (_db, store) = open_store().await;

        store
            .add_booking(test_booking(7, 3, &["Hair Care", "Waxing"]))
            .unwrap();

        let mut updated = test_booking(7, 3, &["Hair Care"]);
        updated.persons = 2;
        store.update_booking(updated);

        let mine = store.bookings_by_user(3);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].services_label(), "Hair Care");
    }

    #[tokio::test]
    async fn test_duplicate_booking_id_signal() {
        let (_db, store) = open_store().await;

        store.add_booking(test_booking(7, 3, &[])).unwrap();
        let err = store.add_booking(test_booking(7, 4, &[])).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateBookingId(7)));
    }

    #[tokio::test]
    async fn test_search_terms_and_filtered_views() {
        let (_db, store) = open_store().await;

        store.register_user(test_user(1, "a@x.com", false)).unwrap();
        store.register_user(test_user(2, "b@x.com", false)).unwrap();
        store.set_users_search_term("user2");
        assert_eq!(store.users_search_term(), "user2");
        assert_eq!(store.filtered_users().len(), 1);

        store.add_booking(test_booking(1, 1, &[])).unwrap();
        store.add_booking(test_booking(2, 1, &[])).unwrap();
        store.set_bookings_search_term("booking 2");
        assert_eq!(store.filtered_bookings().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_orphans_bookings_and_cart() {
        let (_db, store) = open_store().await;

        store.register_user(test_user(3, "c@x.com", false)).unwrap();
        store.add_booking(test_booking(1, 3, &[])).unwrap();
        store.add_item_to_cart(3, test_item(10)).unwrap();

        store.delete_user(3);

        // No cascade: the booking and the cart line are orphaned but served.
        assert!(store.users().is_empty());
        assert_eq!(store.bookings_by_user(3).len(), 1);
        assert_eq!(store.cart_for(3).len(), 1);
    }

    #[tokio::test]
    async fn test_next_booking_id_in_range() {
        let (_db, store) = open_store().await;
        for _ in 0..32 {
            let id = store.next_booking_id();
            assert!((0..BOOKING_ID_RANGE).contains(&id));
        }
    }
}

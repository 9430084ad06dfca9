//! # Users/Auth Slice
//!
//! Owns the user collection, the current session, and the live
//! search-filtered view of users.
//!
//! ## Session Invariant
//! `is_authenticated() == true` iff a current user is set. The slice stores
//! only `current_user: Option<User>` and derives the flag, so the invariant
//! holds by construction and logout clears both atomically.
//!
//! ## Known Gap (preserved)
//! `delete_user` never touches the session, even when the deleted id is the
//! logged-in user. Long-standing product behavior with unconfirmed intent,
//! so it is kept rather than silently fixed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::User;
use crate::validation;

/// State of the users/auth slice.
///
/// Collections are shared snapshots: every mutation swaps in a freshly built
/// `Arc<Vec<_>>`, never edits the one readers may be holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersState {
    users: Arc<Vec<User>>,

    /// Value copy of the user captured at login; `None` when logged out.
    current_user: Option<User>,

    search_term: String,

    /// Users whose username contains `search_term`, case-insensitively.
    /// Recomputed eagerly whenever the term or the collection changes.
    filtered_users: Arc<Vec<User>>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersState {
    /// Creates the empty, logged-out initial state.
    pub fn new() -> Self {
        UsersState {
            users: Arc::new(Vec::new()),
            current_user: None,
            search_term: String::new(),
            filtered_users: Arc::new(Vec::new()),
        }
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Snapshot of the full user collection.
    pub fn users(&self) -> Arc<Vec<User>> {
        Arc::clone(&self.users)
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Whether a user is logged in. Derived from the session, so it can
    /// never disagree with [`UsersState::current_user`].
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// The active users search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Snapshot of the search-filtered user view.
    pub fn filtered_users(&self) -> Arc<Vec<User>> {
        Arc::clone(&self.filtered_users)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Registers a new user.
    ///
    /// ## Behavior
    /// - Rejects when the email is already registered (collection untouched)
    /// - Rejects when the caller-supplied id collides with an existing user
    /// - Does NOT log the new user in
    pub fn register_user(&mut self, user: User) -> CoreResult<()> {
        validation::validate_registration(&user)?;

        if self.users.iter().any(|u| u.email == user.email) {
            return Err(CoreError::EmailAlreadyRegistered(user.email));
        }

        if self.users.iter().any(|u| u.id == user.id) {
            return Err(CoreError::UserIdTaken(user.id));
        }

        let mut next = self.users.as_ref().clone();
        next.push(user);
        self.replace_users(next);
        Ok(())
    }

    /// Attempts to log in with an exact (email, password) match.
    ///
    /// On success the matched user is copied into the session and returned.
    /// On failure the prior session state - logged out or logged in as
    /// someone else - is left exactly as it was.
    pub fn login_user(&mut self, email: &str, password: &str) -> CoreResult<User> {
        let matched = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned();

        match matched {
            Some(user) => {
                self.current_user = Some(user.clone());
                Ok(user)
            }
            None => Err(CoreError::InvalidCredentials),
        }
    }

    /// Unconditionally clears the session.
    pub fn logout_user(&mut self) {
        self.current_user = None;
    }

    /// Replaces the stored record matching `user.id`.
    ///
    /// Silent no-op when the id is not found. Returns whether a record
    /// changed, so the caller can skip persistence on the no-op path.
    pub fn update_user(&mut self, user: User) -> bool {
        self.replace_matching(user.id, move |_| user.clone())
    }

    /// Sets the `is_admin` flag on the matching user. No-op when absent.
    pub fn update_user_role(&mut self, user_id: i64, is_admin: bool) -> bool {
        self.replace_matching(user_id, move |u| {
            let mut u = u.clone();
            u.is_admin = is_admin;
            u
        })
    }

    /// Overwrites `profile_image` on the matching user. No-op when absent.
    pub fn update_profile_image(&mut self, id: i64, new_image: String) -> bool {
        self.replace_matching(id, move |u| {
            let mut u = u.clone();
            u.profile_image = Some(new_image.clone());
            u
        })
    }

    /// Removes the matching user. No-op when absent.
    ///
    /// Does not cascade into bookings or carts, and does not clear the
    /// session even when the deleted id is the logged-in user.
    pub fn delete_user(&mut self, id: i64) -> bool {
        if !self.users.iter().any(|u| u.id == id) {
            return false;
        }

        let next: Vec<User> = self.users.iter().filter(|u| u.id != id).cloned().collect();
        self.replace_users(next);
        true
    }

    /// Stores the search term and eagerly recomputes the filtered view.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.filtered_users = Arc::new(Self::filter(&self.users, &self.search_term));
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Rebuilds the collection with `mutate` applied to the first user whose
    /// id matches. Returns false (leaving every snapshot untouched) when no
    /// user matches.
    fn replace_matching<F>(&mut self, id: i64, mutate: F) -> bool
    where
        F: Fn(&User) -> User,
    {
        let Some(index) = self.users.iter().position(|u| u.id == id) else {
            return false;
        };

        let mut next = self.users.as_ref().clone();
        next[index] = mutate(&next[index]);
        self.replace_users(next);
        true
    }

    /// Swaps in a freshly built collection and keeps the filtered view in
    /// step with it.
    fn replace_users(&mut self, next: Vec<User>) {
        self.users = Arc::new(next);
        self.filtered_users = Arc::new(Self::filter(&self.users, &self.search_term));
    }

    fn filter(users: &[User], term: &str) -> Vec<User> {
        let needle = term.to_lowercase();
        users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

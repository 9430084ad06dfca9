//! # Domain Types
//!
//! Core domain types for the salon booking store.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Booking     │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (= product) │       │
//! │  │  email (login)  │   │  user_id (FK*)  │   │  quantity       │       │
//! │  │  is_admin       │   │  services []    │   │  price          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    Service      │   * "FK" is soft: nothing enforces that           │
//! │  │  ─────────────  │     user_id points at a live user. Deleting       │
//! │  │  static catalog │     a user orphans their bookings and cart        │
//! │  │  of 9 entries   │     rather than cascading.                        │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity id is a caller-supplied `i64`. User ids are assigned at
//! registration (and rejected on collision); booking ids are generated
//! randomly by the submitting layer; cart item ids equal the source product
//! id, which is what makes merge-on-repeat-add possible.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// ## Design Notes
/// - `email` is the unique login key; registration rejects duplicates.
/// - `password` is an opaque string compared by exact match. This is a local,
///   single-process store: hashing and real credential security are
///   explicitly out of scope.
/// - `profile_image` holds an already-encoded string (e.g., a data URL)
///   produced by the presentation layer; the store keeps it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    /// Unique identifier, immutable once registered.
    pub id: i64,

    /// Display name; the users search filter matches against this.
    pub username: String,

    /// Unique login key.
    pub email: String,

    /// Opaque credential string, exact-match compared at login.
    pub password: String,

    /// Contact phone number.
    pub phone: String,

    /// Optional encoded profile image, stored verbatim.
    pub profile_image: Option<String>,

    /// Grants access to the admin dashboard.
    pub is_admin: bool,
}

// =============================================================================
// Booking
// =============================================================================

/// A submitted booking ("message" in the contact-form sense).
///
/// ## Services Representation
/// A booking references a variable-size, ordered list of service titles.
/// It is stored as an explicit `Vec<String>`; the comma-joined label the UI
/// renders (`"Hair Care, Waxing"`) is produced only at the presentation
/// boundary by [`Booking::services_label`]. A service title containing a
/// comma therefore cannot corrupt stored data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Booking {
    /// Unique identifier, generated by the submitting layer.
    pub id: i64,

    /// Contact name entered on the form.
    pub name: String,

    /// Calendar date string, kept exactly as entered.
    pub date: String,

    /// Number of persons the booking is for. Always positive.
    pub persons: u32,

    /// Free-text description.
    pub desc: String,

    /// Ordered list of requested service titles.
    pub services: Vec<String>,

    /// Id of the owning user. Soft reference: never enforced against the
    /// user collection, and deleting the user leaves this dangling.
    pub user_id: i64,

    /// The owner's email, copied at creation time. Deliberately denormalized
    /// so the booking stays readable even if the account changes or goes.
    pub email: String,
}

impl Booking {
    /// Joins the services into the human-readable label the UI displays.
    ///
    /// ## Example
    /// ```rust
    /// use salon_core::Booking;
    ///
    /// let booking = Booking {
    ///     id: 7,
    ///     name: "Ayesha".to_string(),
    ///     date: "2025-03-14".to_string(),
    ///     persons: 2,
    ///     desc: String::new(),
    ///     services: vec!["Hair Care".to_string(), "Waxing".to_string()],
    ///     user_id: 3,
    ///     email: "a@x.com".to_string(),
    /// };
    /// assert_eq!(booking.services_label(), "Hair Care, Waxing");
    /// ```
    pub fn services_label(&self) -> String {
        self.services.join(", ")
    }
}

/// Splits a legacy comma-joined services label back into titles.
///
/// Only for accepting *input* at the presentation boundary (e.g., a
/// pre-filled edit form); stored bookings always carry the list form.
/// Empty segments are dropped and surrounding whitespace is trimmed.
pub fn parse_services_label(label: &str) -> Vec<String> {
    label
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// =============================================================================
// Service
// =============================================================================

/// A catalog entry: one sellable salon service.
///
/// The catalog is static seed data, read-only at runtime. See
/// [`crate::catalog`] for the seeded set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Service {
    pub id: i64,
    /// Image reference for the service card.
    pub url: String,
    pub title: String,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in a user's cart.
///
/// ## Invariant
/// Within one user's cart, `id` is unique: adding an item whose id is
/// already present accumulates `quantity` instead of duplicating the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Equals the source product id.
    pub id: i64,

    pub name: String,

    /// Unit price as displayed by the catalog.
    pub price: f64,

    /// Image reference for the cart row.
    pub image: String,

    /// Starts at 1 and accumulates on repeat add.
    pub quantity: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_with_services(services: &[&str]) -> Booking {
        Booking {
            id: 1,
            name: "Test".to_string(),
            date: "2025-01-01".to_string(),
            persons: 1,
            desc: String::new(),
            services: services.iter().map(|s| s.to_string()).collect(),
            user_id: 1,
            email: "t@x.com".to_string(),
        }
    }

    #[test]
    fn test_services_label_joins_in_order() {
        let booking = booking_with_services(&["Hair Care", "Waxing", "Threading"]);
        assert_eq!(booking.services_label(), "Hair Care, Waxing, Threading");
    }

    #[test]
    fn test_services_label_empty() {
        let booking = booking_with_services(&[]);
        assert_eq!(booking.services_label(), "");
    }

    #[test]
    fn test_parse_services_label_trims_and_drops_empties() {
        assert_eq!(
            parse_services_label("Hair Care,  Waxing , ,Threading"),
            vec!["Hair Care", "Waxing", "Threading"]
        );
        assert!(parse_services_label("").is_empty());
        assert!(parse_services_label(" , ").is_empty());
    }

    #[test]
    fn test_comma_in_title_survives_storage() {
        // The stored form is the list, so a title with a comma round-trips
        // through serialization intact (only the legacy label is lossy).
        let booking = booking_with_services(&["Cut, Wash & Dry"]);
        let json = serde_json::to_string(&booking).unwrap();
        let back: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(back.services, vec!["Cut, Wash & Dry"]);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let user = User {
            id: 1,
            username: "amna".to_string(),
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
            phone: "0300".to_string(),
            profile_image: None,
            is_admin: true,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"isAdmin\":true"));
        assert!(json.contains("\"profileImage\":null"));
    }
}

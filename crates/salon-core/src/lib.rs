//! # salon-core: Pure State Logic for the Salon Booking Store
//!
//! This crate is the **heart** of the salon booking store. It contains the
//! whole client-side data model as pure, synchronous state slices with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Salon Booking Store Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Layer (web UI)                    │   │
//! │  │    Login ──► Services ──► Cart ──► Contact ──► Admin Dashboard │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ actions / selectors                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   salon-store (orchestrator)                    │   │
//! │  │    dispatch ──► owning slice ──► fresh snapshot ──► persist    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ salon-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   slice   │  │ selector  │  │ validation│  │   │
//! │  │   │   User    │  │   users   │  │ bookings  │  │   rules   │  │   │
//! │  │   │  Booking  │  │  bookings │  │  by user  │  │  checks   │  │   │
//! │  │   │ CartItem  │  │   carts   │  │ (memoized)│  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Booking, Service, CartItem)
//! - [`catalog`] - The static, read-only service catalog seed
//! - [`slice`] - The three owned state slices (users/auth, bookings, carts)
//! - [`selector`] - Derived read functions, including the memoized
//!   bookings-by-user selector
//! - [`error`] - Rejection signals and validation errors
//! - [`validation`] - Field-level input validation
//!
//! ## Design Principles
//!
//! 1. **Fresh snapshots**: every mutation builds a new collection and swaps
//!    an `Arc`; readers holding an older snapshot never observe a partial
//!    mutation, and memoized selectors invalidate by pointer identity.
//! 2. **Signals, not panics**: rejected actions (duplicate email, bad
//!    credentials, duplicate booking id) return typed errors and leave prior
//!    state untouched; update/delete of an absent id is a silent no-op.
//! 3. **No cross-slice coupling**: deleting a user does not cascade into that
//!    user's bookings or cart; orphaned references are tolerated by design.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod selector;
pub mod slice;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use salon_core::User` instead of
// `use salon_core::types::User`

pub use error::{CoreError, CoreResult, ValidationError};
pub use selector::BookingsByUser;
pub use slice::{BookingsState, CartsState, UsersState};
pub use types::{parse_services_label, Booking, CartItem, Service, User};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length accepted for a username.
pub const MAX_USERNAME_LEN: usize = 50;

/// Maximum length accepted for a booking's contact name.
pub const MAX_BOOKING_NAME_LEN: usize = 200;

/// Maximum quantity of a single line item in a cart.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;

//! # salon-store: Store Orchestrator
//!
//! Composes the three state slices into one addressable root state and is
//! the sole writer of record.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dispatch Cycle                                   │
//! │                                                                         │
//! │  UI dispatches action                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store routes it to the owning slice (under one mutex)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Slice produces a fresh immutable snapshot                             │
//! │       │                                                                 │
//! │       ├──► accepted mutation of a wrapped slice?                       │
//! │       │         │                                                       │
//! │       │         ▼                                                       │
//! │       │    serialize whole slice ──► writer task ──► slice_store       │
//! │       │    (fire-and-forget: the dispatch path never blocks on or      │
//! │       │     observes durability; failures are logged at warn)          │
//! │       ▼                                                                 │
//! │  UI re-reads via selectors                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store itself implements no business rules - it is purely
//! compositional. No cross-slice invariant is enforced here: deleting a user
//! does not cascade to that user's bookings or cart.
//!
//! ## Modules
//!
//! - [`store`] - The [`Store`] itself: actions, selectors, hydration
//! - [`persist`] - The background durability writer
//! - [`error`] - Store-level error type

pub mod error;
pub mod persist;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::Store;

// Consumers of the store almost always need the domain types too.
pub use salon_core::{Booking, CartItem, CoreError, Service, User};

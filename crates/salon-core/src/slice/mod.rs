//! # State Slices
//!
//! The three owned, independently addressable partitions of root state.
//!
//! ## Mutation Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Semantics                                   │
//! │                                                                         │
//! │  Reader A ───► Arc<Vec<User>> #1 ─────────────────────── still #1      │
//! │                                                                         │
//! │  register_user()                                                        │
//! │       │                                                                 │
//! │       ├── clone Vec out of Arc #1                                       │
//! │       ├── push new user                                                 │
//! │       └── swap in Arc<Vec<User>> #2                                     │
//! │                                                                         │
//! │  Reader B ───► Arc<Vec<User>> #2                                        │
//! │                                                                         │
//! │  Snapshots are immutable once handed out; a selector memoized against  │
//! │  Arc #1 invalidates by pointer identity the moment #2 is swapped in.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Slices are plain values with `&mut self` operations. The orchestrating
//! layer owns them and serializes access; nothing in here is a shared
//! mutable singleton.

mod bookings;
mod cart;
mod users;

pub use bookings::BookingsState;
pub use cart::CartsState;
pub use users::UsersState;

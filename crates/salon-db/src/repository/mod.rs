//! # Repository Module
//!
//! Repository implementations over the connection pool.
//!
//! One repository per storage concern; the salon store has exactly one:
//! the key-value table holding whole-slice snapshots.

pub mod slice_store;

pub use slice_store::SliceStoreRepository;

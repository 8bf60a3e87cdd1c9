//! Shared utility types used across the domain crate.
//!
//! # Design Principles
//!
//! - **Pure only** - no side effects, no I/O
//! - **Minimal dependencies** - nothing beyond the standard library

pub mod watched_list;

pub use watched_list::WatchedList;

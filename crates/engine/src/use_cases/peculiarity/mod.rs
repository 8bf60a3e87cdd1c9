//! Peculiarity use cases.

pub mod list_peculiarities;

pub use list_peculiarities::ListPeculiarities;

//! Infrastructure: ports the use cases consume and the adapters that
//! implement them.

pub mod persistence;
pub mod ports;

//! Adapters implementing the task repository port.
//!
//! - [`postgres`]: Diesel over an r2d2 pool owned by
//!   [`TaskDatabase`](crate::database::TaskDatabase)
//! - [`memory`]: lock-protected maps with the same observable behaviour

pub mod memory;
pub mod postgres;

//! Sales domain module.
//!
//! Purchase orders against product stock. Pure domain logic (no IO, no HTTP,
//! no storage).

pub mod fulfillment;

pub use fulfillment::{fulfill, Fulfillment, OrderLine};

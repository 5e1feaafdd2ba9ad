//! `warehouse-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod ledger;

pub use entity::{Entity, Stocked};
pub use error::{DomainError, DomainResult};
pub use id::{ArticleId, IdSequence};
pub use ledger::StockLedger;

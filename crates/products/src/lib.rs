//! Products domain module.
//!
//! Assembled, sellable products and the rule for adding product stock out of
//! article stock. Pure domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{upsert_product, AddProduct, Product, ProductAssembly, ProductName};

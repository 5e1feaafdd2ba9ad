//! Infrastructure layer: catalog documents, storage backends, and the
//! authoritative warehouse state.

pub mod catalog;
pub mod warehouse;


pub use catalog::{CatalogError, CatalogLoader, DocumentStore, InMemoryDocumentStore, JsonFileStore};
pub use warehouse::{Warehouse, WarehouseError};

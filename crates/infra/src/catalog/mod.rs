//! Catalog documents: typed JSON codecs, backing stores, and the loader.

pub mod document;
pub mod error;
pub mod loader;
pub mod store;

pub use error::CatalogError;
pub use loader::CatalogLoader;
pub use store::{DocumentStore, InMemoryDocumentStore, JsonFileStore};

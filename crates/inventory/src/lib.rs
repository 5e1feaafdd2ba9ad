//! Inventory domain module.
//!
//! Raw articles, bill-of-materials lines, and the composition rules that decide
//! whether a product can be assembled from the articles on hand. Pure domain
//! logic (no IO, no HTTP, no storage).

pub mod article;
pub mod composition;

pub use article::{upsert_article, Article, ArticleRequirement, ArticleUpsert};
pub use composition::{can_assemble, check_assembly, consume, Shortfall};

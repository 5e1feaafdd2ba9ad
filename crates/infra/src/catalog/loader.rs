//! Catalog loader: reads and writes the article and product documents.

use std::path::PathBuf;
use std::sync::Arc;

use warehouse_core::StockLedger;
use warehouse_inventory::Article;
use warehouse_products::Product;

use super::document;
use super::error::CatalogError;
use super::store::{DocumentStore, JsonFileStore};

/// Reads the full backing document on every call; nothing is cached here.
#[derive(Clone)]
pub struct CatalogLoader {
    articles: Arc<dyn DocumentStore>,
    products: Arc<dyn DocumentStore>,
}

impl CatalogLoader {
    pub fn new(articles: Arc<dyn DocumentStore>, products: Arc<dyn DocumentStore>) -> Self {
        Self { articles, products }
    }

    pub fn from_paths(articles: impl Into<PathBuf>, products: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(JsonFileStore::new(articles)),
            Arc::new(JsonFileStore::new(products)),
        )
    }

    pub fn load_articles(&self) -> Result<Vec<Article>, CatalogError> {
        Ok(self.load_article_ledger()?.into_entries())
    }

    pub fn load_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.load_product_ledger()?.into_entries())
    }

    /// Articles indexed by `art_id`; repeated ids are rejected.
    pub fn load_article_ledger(&self) -> Result<StockLedger<Article>, CatalogError> {
        let name = self.articles.name();
        let bytes = self.articles.read()?;
        let articles = document::decode_articles(name, &bytes)?;
        StockLedger::from_entries(articles).map_err(|source| CatalogError::DuplicateKey {
            document: name.to_string(),
            source,
        })
    }

    /// Products indexed by name; repeated names are rejected.
    pub fn load_product_ledger(&self) -> Result<StockLedger<Product>, CatalogError> {
        let name = self.products.name();
        let bytes = self.products.read()?;
        let products = document::decode_products(name, &bytes)?;
        StockLedger::from_entries(products).map_err(|source| CatalogError::DuplicateKey {
            document: name.to_string(),
            source,
        })
    }

    pub fn save_articles(&self, articles: &[Article]) -> Result<(), CatalogError> {
        let bytes = document::encode_articles(self.articles.name(), articles)?;
        self.articles.write(&bytes)
    }

    pub fn save_products(&self, products: &[Product]) -> Result<(), CatalogError> {
        let bytes = document::encode_products(self.products.name(), products)?;
        self.products.write(&bytes)
    }
}

impl core::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("articles", &self.articles.name())
            .field("products", &self.products.name())
            .finish()
    }
}

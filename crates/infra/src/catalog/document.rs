//! Schema-typed decode/encode for the two catalog documents.
//!
//! ```text
//! { "articles": [ { "art_id": "1", "name": "leg", "stock": 12 } ] }
//! { "products": [ { "name": "Dining Chair",
//!                   "contain_articles": [ { "art_id": "1", "amount_of": 4 } ],
//!                   "price": 100.0, "stock": 3 } ] }
//! ```

use serde::{Deserialize, Serialize};

use warehouse_inventory::Article;
use warehouse_products::Product;

use super::error::CatalogError;

pub const ARTICLES_KEY: &str = "articles";
pub const PRODUCTS_KEY: &str = "products";

#[derive(Deserialize)]
struct ArticlesIn {
    articles: Option<Vec<Article>>,
}

#[derive(Serialize)]
struct ArticlesOut<'a> {
    articles: &'a [Article],
}

#[derive(Deserialize)]
struct ProductsIn {
    products: Option<Vec<Product>>,
}

#[derive(Serialize)]
struct ProductsOut<'a> {
    products: &'a [Product],
}

pub fn decode_articles(document: &str, bytes: &[u8]) -> Result<Vec<Article>, CatalogError> {
    let parsed: ArticlesIn = serde_json::from_slice(bytes).map_err(|source| CatalogError::Malformed {
        document: document.to_string(),
        source,
    })?;
    parsed.articles.ok_or_else(|| CatalogError::MissingArray {
        document: document.to_string(),
        key: ARTICLES_KEY,
    })
}

pub fn decode_products(document: &str, bytes: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let parsed: ProductsIn = serde_json::from_slice(bytes).map_err(|source| CatalogError::Malformed {
        document: document.to_string(),
        source,
    })?;
    parsed.products.ok_or_else(|| CatalogError::MissingArray {
        document: document.to_string(),
        key: PRODUCTS_KEY,
    })
}

pub fn encode_articles(document: &str, articles: &[Article]) -> Result<Vec<u8>, CatalogError> {
    serde_json::to_vec_pretty(&ArticlesOut { articles }).map_err(|source| CatalogError::Encode {
        document: document.to_string(),
        source,
    })
}

pub fn encode_products(document: &str, products: &[Product]) -> Result<Vec<u8>, CatalogError> {
    serde_json::to_vec_pretty(&ProductsOut { products }).map_err(|source| CatalogError::Encode {
        document: document.to_string(),
        source,
    })
}

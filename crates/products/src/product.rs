use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Entity, StockLedger, Stocked};
use warehouse_inventory::{check_assembly, consume, Article, ArticleRequirement, Shortfall};

/// Product key: the display name is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Assembled, sellable item with its own stock, independent of article stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: ProductName,
    pub contain_articles: Vec<ArticleRequirement>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u64,
}

impl Product {
    pub fn new(
        name: impl Into<ProductName>,
        contain_articles: Vec<ArticleRequirement>,
        price: f64,
        stock: u64,
    ) -> Self {
        Self {
            name: name.into(),
            contain_articles,
            price,
            stock,
        }
    }
}

impl Entity for Product {
    type Id = ProductName;

    fn id(&self) -> &ProductName {
        &self.name
    }
}

impl Stocked for Product {
    fn stock(&self) -> u64 {
        self.stock
    }

    fn stock_mut(&mut self) -> &mut u64 {
        &mut self.stock
    }
}

/// Request to assemble `stock_to_add` units of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct AddProduct {
    pub name: ProductName,
    pub requirements: Vec<ArticleRequirement>,
    pub price: f64,
    pub stock_to_add: u64,
}

/// What `upsert_product` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAssembly {
    /// A new product was added with exactly the requested stock.
    Created,
    /// An existing product's stock grew to `stock`.
    Restocked { stock: u64 },
    /// Articles could not cover the request; nothing changed.
    Insufficient(Shortfall),
}

impl ProductAssembly {
    pub fn is_assembled(&self) -> bool {
        !matches!(self, ProductAssembly::Insufficient(_))
    }
}

/// Assemble product stock out of article stock.
///
/// Availability is checked against the request's requirement list. On success
/// the articles are consumed and the product is either restocked or created;
/// on shortfall neither ledger is touched.
pub fn upsert_product(
    products: &mut StockLedger<Product>,
    articles: &mut StockLedger<Article>,
    request: &AddProduct,
) -> DomainResult<ProductAssembly> {
    if request.name.as_str().trim().is_empty() {
        return Err(DomainError::validation("product name cannot be empty"));
    }

    if let Err(shortfall) = check_assembly(&request.requirements, request.stock_to_add, articles) {
        tracing::debug!(
            product = %request.name,
            art_id = %shortfall.art_id,
            required = ?shortfall.required,
            available = ?shortfall.available,
            "not enough article stock to assemble product"
        );
        return Ok(ProductAssembly::Insufficient(shortfall));
    }

    let restocked = match products.stock_of(&request.name) {
        Some(current) => Some(
            current
                .checked_add(request.stock_to_add)
                .ok_or_else(|| DomainError::invariant("product stock overflow"))?,
        ),
        None => None,
    };

    consume(&request.requirements, request.stock_to_add, articles)?;

    match restocked {
        Some(stock) => {
            if let Some(product) = products.get_mut(&request.name) {
                *product.stock_mut() = stock;
            }
            Ok(ProductAssembly::Restocked { stock })
        }
        None => {
            products.push(Product::new(
                request.name.clone(),
                request.requirements.clone(),
                request.price,
                request.stock_to_add,
            ))?;
            Ok(ProductAssembly::Created)
        }
    }
}

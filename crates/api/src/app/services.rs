use std::collections::BTreeMap;
use std::sync::Arc;

use warehouse_infra::{CatalogLoader, Warehouse, WarehouseError};
use warehouse_inventory::Article;
use warehouse_products::{AddProduct, Product, ProductAssembly};
use warehouse_sales::{Fulfillment, OrderLine};

use crate::app::errors::ApiError;
use crate::config::ApiConfig;

/// Handle to the warehouse shared by all handlers.
///
/// Warehouse operations take locks and touch the filesystem, so they run on
/// the blocking pool rather than on the async workers.
#[derive(Clone)]
pub struct AppServices {
    warehouse: Arc<Warehouse>,
}

impl AppServices {
    pub fn new(warehouse: Warehouse) -> Self {
        Self {
            warehouse: Arc::new(warehouse),
        }
    }

    /// Open the warehouse over the configured JSON documents.
    pub fn open(config: &ApiConfig) -> Result<Self, WarehouseError> {
        let loader = CatalogLoader::from_paths(&config.articles_path, &config.products_path);
        Ok(Self::new(Warehouse::open(loader)?))
    }

    pub async fn import_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.blocking(|w| w.import_articles()).await
    }

    pub async fn import_products(&self) -> Result<Vec<Product>, ApiError> {
        self.blocking(|w| w.import_products()).await
    }

    pub async fn add_article(&self, name: String, stock: u64) -> Result<Vec<Article>, ApiError> {
        self.blocking(move |w| w.add_article(&name, stock)).await
    }

    pub async fn add_product(&self, request: AddProduct) -> Result<ProductAssembly, ApiError> {
        self.blocking(move |w| w.add_product(&request)).await
    }

    pub async fn product_stock(&self) -> Result<BTreeMap<String, u64>, ApiError> {
        self.blocking(|w| w.product_stock()).await
    }

    pub async fn place_order(&self, lines: Vec<OrderLine>) -> Result<Fulfillment, ApiError> {
        self.blocking(move |w| w.place_order(&lines)).await
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Warehouse) -> Result<T, WarehouseError> + Send + 'static,
        T: Send + 'static,
    {
        let warehouse = self.warehouse.clone();
        tokio::task::spawn_blocking(move || f(&warehouse))
            .await
            .map_err(|e| ApiError::Task(e.to_string()))?
            .map_err(ApiError::from)
    }
}

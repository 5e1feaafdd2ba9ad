use axum::{
    routing::{get, post},
    Router,
};

pub mod inventory;
pub mod products;
pub mod sales;
pub mod system;

/// Router for the catalog and order endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/import-articles", get(inventory::import_articles))
        .route("/add-article", post(inventory::add_article))
        .route("/import-products", get(products::import_products))
        .route("/add-product", post(products::add_product))
        .route("/get-all-products", get(products::get_all_products))
        .route("/buy-product", post(sales::buy_product))
}

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use warehouse_products::AddProduct;

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn import_products(Extension(services): Extension<AppServices>) -> axum::response::Response {
    tracing::info!("request received to import products");

    match services.import_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn add_product(
    Extension(services): Extension<AppServices>,
    Json(body): Json<dto::AddProductRequest>,
) -> axum::response::Response {
    tracing::info!(name = %body.name, stock = body.stock, "request received to add product");

    match services.add_product(AddProduct::from(body)).await {
        Ok(outcome) if outcome.is_assembled() => (StatusCode::OK, dto::PRODUCT_ADDED).into_response(),
        Ok(_) => (StatusCode::BAD_REQUEST, dto::PRODUCT_NOT_ADDED).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_all_products(Extension(services): Extension<AppServices>) -> axum::response::Response {
    tracing::info!("request received to retrieve all products");

    match services.product_stock().await {
        Ok(stock) => (StatusCode::OK, Json(stock)).into_response(),
        Err(e) => e.into_response(),
    }
}

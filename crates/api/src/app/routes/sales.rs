use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn buy_product(
    Extension(services): Extension<AppServices>,
    Json(body): Json<dto::BuyProductRequest>,
) -> axum::response::Response {
    tracing::info!(lines = body.required_product_list.len(), "request received to place an order");

    match services.place_order(body.required_product_list).await {
        Ok(outcome) if outcome.is_fulfilled() => (StatusCode::OK, dto::ORDER_SUCCESSFUL).into_response(),
        Ok(_) => (StatusCode::BAD_REQUEST, dto::ORDER_OUT_OF_STOCK).into_response(),
        Err(e) => e.into_response(),
    }
}

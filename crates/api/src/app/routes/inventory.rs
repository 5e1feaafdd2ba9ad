use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn import_articles(Extension(services): Extension<AppServices>) -> axum::response::Response {
    tracing::info!("request received to import articles");

    match services.import_articles().await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn add_article(
    Extension(services): Extension<AppServices>,
    Json(body): Json<dto::AddArticleRequest>,
) -> axum::response::Response {
    tracing::info!(name = %body.name, stock = body.stock, "request received to add an article");

    match services.add_article(body.name, body.stock).await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => e.into_response(),
    }
}

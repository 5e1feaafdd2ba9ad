use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full router: health check plus the catalog/order API, optionally
/// mounted under `route_prefix`.
pub fn build_app(services: AppServices, route_prefix: Option<&str>) -> Router {
    let api = routes::router().layer(Extension(services));
    let api = match route_prefix {
        Some(prefix) => Router::new().nest(prefix, api),
        None => api,
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(api)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(
            crate::middleware::trace_requests,
        )))
}

//! Process configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const BIND_ADDR: &str = "WAREHOUSE_BIND_ADDR";
pub const ARTICLES_PATH: &str = "WAREHOUSE_ARTICLES_PATH";
pub const PRODUCTS_PATH: &str = "WAREHOUSE_PRODUCTS_PATH";
pub const ROUTE_PREFIX: &str = "WAREHOUSE_ROUTE_PREFIX";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ARTICLES_PATH: &str = "data/articles.json";
const DEFAULT_PRODUCTS_PATH: &str = "data/products.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub articles_path: PathBuf,
    pub products_path: PathBuf,
    /// Mount point for the API routes, e.g. `/ikea`. `None` serves at `/`.
    pub route_prefix: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|e| ConfigError::Invalid {
            key: BIND_ADDR,
            message: format!("{bind_addr:?}: {e}"),
        })?;

        let articles_path = lookup(ARTICLES_PATH).unwrap_or_else(|| {
            tracing::warn!("{ARTICLES_PATH} not set; using {DEFAULT_ARTICLES_PATH}");
            DEFAULT_ARTICLES_PATH.to_string()
        });
        let products_path = lookup(PRODUCTS_PATH).unwrap_or_else(|| {
            tracing::warn!("{PRODUCTS_PATH} not set; using {DEFAULT_PRODUCTS_PATH}");
            DEFAULT_PRODUCTS_PATH.to_string()
        });

        let route_prefix = match lookup(ROUTE_PREFIX) {
            Some(p) => parse_prefix(&p)?,
            None => None,
        };

        Ok(Self {
            bind_addr,
            articles_path: PathBuf::from(articles_path),
            products_path: PathBuf::from(products_path),
            route_prefix,
        })
    }
}

fn parse_prefix(raw: &str) -> Result<Option<String>, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !trimmed.starts_with('/') || trimmed.contains(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            key: ROUTE_PREFIX,
            message: format!("{raw:?} must look like /segment"),
        });
    }
    // The router treats these as captures, and nesting under a wildcard panics.
    let has_capture = trimmed
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.contains('*'));
    if has_capture {
        return Err(ConfigError::Invalid {
            key: ROUTE_PREFIX,
            message: format!("{raw:?} must be a literal path without `:` or `*` segments"),
        });
    }
    Ok(Some(trimmed.to_string()))
}

use thiserror::Error;

use warehouse_core::DomainError;

/// Failure reading, decoding, or writing a catalog document.
///
/// `document` names the backing store (usually a file path) for context.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot access {document}: {source}")]
    Io {
        document: String,
        source: std::io::Error,
    },

    #[error("malformed document {document}: {source}")]
    Malformed {
        document: String,
        source: serde_json::Error,
    },

    #[error("document {document} has no `{key}` array")]
    MissingArray { document: String, key: &'static str },

    #[error("document {document} repeats an identifier: {source}")]
    DuplicateKey {
        document: String,
        source: DomainError,
    },

    #[error("cannot encode {document}: {source}")]
    Encode {
        document: String,
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn io(document: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            document: document.into(),
            source,
        }
    }

    pub fn document(&self) -> &str {
        match self {
            CatalogError::Io { document, .. }
            | CatalogError::Malformed { document, .. }
            | CatalogError::MissingArray { document, .. }
            | CatalogError::DuplicateKey { document, .. }
            | CatalogError::Encode { document, .. } => document,
        }
    }
}

//! Backing stores for catalog documents.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::RwLock;

use super::error::CatalogError;

/// Whole-document load/store interface.
pub trait DocumentStore: Send + Sync {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> &str;

    fn read(&self) -> Result<Vec<u8>, CatalogError>;

    /// Replace the whole document. Readers see either the old or the new
    /// contents, never a mix.
    fn write(&self, bytes: &[u8]) -> Result<(), CatalogError>;
}

/// JSON document on the local filesystem.
///
/// Writes go to a sibling temp file which is synced and renamed over the
/// target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    name: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }
}

impl DocumentStore for JsonFileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<u8>, CatalogError> {
        fs::read(&self.path).map_err(|e| CatalogError::io(&self.name, e))
    }

    fn write(&self, bytes: &[u8]) -> Result<(), CatalogError> {
        let tmp = self.temp_path();
        let result = (|| {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(CatalogError::io(&self.name, e));
        }
        Ok(())
    }
}

/// In-memory document for tests/dev.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    name: String,
    inner: RwLock<Option<Vec<u8>>>,
}

impl InMemoryDocumentStore {
    /// A store with no document yet; reads fail with `NotFound`.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(None),
        }
    }

    pub fn with_contents(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(Some(contents.into())),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<u8>, CatalogError> {
        let doc = self.inner.read().map_err(|_| {
            CatalogError::io(&self.name, std::io::Error::other("lock poisoned"))
        })?;
        doc.clone().ok_or_else(|| {
            CatalogError::io(
                &self.name,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no document"),
            )
        })
    }

    fn write(&self, bytes: &[u8]) -> Result<(), CatalogError> {
        let mut doc = self.inner.write().map_err(|_| {
            CatalogError::io(&self.name, std::io::Error::other("lock poisoned"))
        })?;
        *doc = Some(bytes.to_vec());
        Ok(())
    }
}

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::catalog::parse::{parse_catalog_slice, parse_catalog_value};
use crate::errors::AppError;
use crate::models::Catalog;

/// Where the session's catalog comes from. Implement this to bundle the catalog
/// differently without touching the matcher or the session host.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog, AppError>;
}

/// Reads the bundled `activities.json` from disk.
pub struct FileCatalogSource {
    pub path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Catalog, AppError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::Catalog(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let catalog = parse_catalog_slice(&bytes)?;
        info!(
            path = %self.path.display(),
            activities = catalog.activities.len(),
            rows = catalog.row_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

/// Catalog already held in memory as JSON (tests, or a host that fetched it itself).
pub struct JsonCatalogSource(pub serde_json::Value);

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn load(&self) -> Result<Catalog, AppError> {
        parse_catalog_value(&self.0)
    }
}

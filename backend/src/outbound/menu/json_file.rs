//! Menu adapter backed by a JSON file.
//!
//! The file is re-read on every request so operators can swap the menu
//! without a restart. File access goes through `cap_std` and runs on the
//! blocking pool.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use super::document::MenuDocument;
use crate::domain::Catalog;
use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};

/// Reads the catalogue from a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileMenuRepository {
    path: PathBuf,
}

impl JsonFileMenuRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(path: &Path) -> Result<Catalog, CatalogRepositoryError> {
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            CatalogRepositoryError::connection(format!("{} does not name a file", path.display()))
        })?;
        let raw = Dir::open_ambient_dir(parent, ambient_authority())
            .and_then(|dir| dir.read_to_string(file_name))
            .map_err(|err| {
                CatalogRepositoryError::connection(format!("{}: {err}", path.display()))
            })?;
        let document: MenuDocument = serde_json::from_str(&raw)
            .map_err(|err| CatalogRepositoryError::query(format!("{}: {err}", path.display())))?;
        Catalog::try_from(document)
            .map_err(|err| CatalogRepositoryError::query(format!("{}: {err}", path.display())))
    }
}

#[async_trait]
impl CatalogRepository for JsonFileMenuRepository {
    async fn menu(&self) -> Result<Catalog, CatalogRepositoryError> {
        let path = self.path.clone();
        debug!(path = %path.display(), "reading menu file");
        tokio::task::spawn_blocking(move || Self::read(&path))
            .await
            .map_err(|err| CatalogRepositoryError::connection(format!("menu read task failed: {err}")))?
    }
}

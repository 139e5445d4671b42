// src/fetch/local.rs
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::CatalogSource;
use crate::error::SourceError;

/// CSV file bundled next to the application.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String, SourceError> {
        debug!(path = %self.path.display(), "reading catalog");
        fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

//! Error types for catalog loading and the cart.

use std::path::PathBuf;

/// A single catalog source could not produce usable rows.
///
/// Always recovered by moving on to the next source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport failure talking to a remote source.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A local file was missing or unreadable.
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source answered but parsed to zero data rows.
    #[error("{0} yielded no data rows")]
    Empty(String),

    /// No table matched the selector in a rendered page.
    #[error("no table matching `{selector}` in {}", path.display())]
    TableNotFound { selector: String, path: PathBuf },

    #[error("invalid CSS selector `{0}`")]
    Selector(String),
}

/// Catalog resolution failed as a whole.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Every configured source failed. Callers fall back to hydrating the
    /// already-rendered table.
    #[error("no catalog source produced data (tried: {})", attempted.join(", "))]
    NoDataAvailable { attempted: Vec<String> },
}

/// A cart mutation could not be committed.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The stored cart could not be read, so it cannot be safely rewritten.
    #[error("reading cart from storage: {0}")]
    StorageRead(std::io::Error),

    #[error("writing cart to storage: {0}")]
    StorageWrite(#[from] std::io::Error),

    #[error("encoding cart: {0}")]
    Encode(#[from] serde_json::Error),
}

// src/fetch/hydrate.rs
//! Last-resort input: a catalog table that is already rendered in a page.
//!
//! When every CSV source fails, the header and body cells of that table are
//! read back into a [`RawTable`] so the rows can still be decorated with cart
//! state and filtered.

use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::process::RawTable;

/// Header text of the action column added by a previous decoration pass.
const ACTION_HEADER: &str = "Add";

/// A rendered page and the selector of the catalog table inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTable {
    pub path: PathBuf,
    pub selector: String,
}

impl HtmlTable {
    pub fn new(path: impl AsRef<Path>, selector: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            selector: selector.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.path.display(), self.selector)
    }

    #[tracing::instrument(level = "info", skip_all)]
    pub async fn load(&self) -> Result<RawTable, SourceError> {
        let html = fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let table = extract_table(&html, &self.selector)?.ok_or_else(|| {
            SourceError::TableNotFound {
                selector: self.selector.clone(),
                path: self.path.clone(),
            }
        })?;
        info!(path = %self.path.display(), rows = table.rows.len(), "hydrated rendered table");
        Ok(table)
    }
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|_| SourceError::Selector(css.to_string()))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Read the first table matching `table_css` out of an HTML document.
///
/// Returns `Ok(None)` when no element matches. Header cells come from
/// `thead th`, rows from `tbody tr > td`. A trailing `Add` action column is
/// dropped so decorating twice does not feed button labels into the data.
pub fn extract_table(html: &str, table_css: &str) -> Result<Option<RawTable>, SourceError> {
    let table_sel = selector(table_css)?;
    let head_sel = selector("thead th")?;
    let row_sel = selector("tbody tr")?;
    let cell_sel = selector("td")?;

    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&table_sel).next() else {
        return Ok(None);
    };

    let mut headers: Vec<String> = table.select(&head_sel).map(cell_text).collect();
    let mut rows: Vec<Vec<String>> = table
        .select(&row_sel)
        .map(|tr| tr.select(&cell_sel).map(cell_text).collect())
        .collect();

    if headers.last().map(String::as_str) == Some(ACTION_HEADER) {
        headers.pop();
        let width = headers.len();
        for row in &mut rows {
            row.truncate(width);
        }
        debug!("dropped existing action column");
    }

    Ok(Some(RawTable::new(headers, rows)))
}

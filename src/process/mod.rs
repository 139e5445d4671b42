// src/process/mod.rs
pub mod normalize;
pub mod parse;

pub use normalize::{display_header, display_order, normalize, FieldMap};
pub use parse::parse_csv;

use crate::schema::{default_header, CanonicalRecord};

/// A catalog as it came out of a source: a header plus positionally aligned
/// rows, before any canonical mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names as the source spells them.
    pub headers: Vec<String>,
    /// Data rows, padded with empty cells up to the header width.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Assemble a table, padding short rows to the header width. Longer rows
    /// are kept as-is; their extra cells never map to a canonical field.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
        Self { headers, rows }
    }

    /// Treat the first parsed row as the header.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut rows = rows.into_iter();
        match rows.next() {
            Some(headers) => Self::new(headers, rows.collect()),
            None => Self::default(),
        }
    }

    pub fn from_csv(text: &str) -> Self {
        Self::from_rows(parse_csv(text))
    }

    /// True when there is no data row; sources in that state are rejected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The header in effect: the source header, or the default column set
    /// when the source had none.
    pub fn effective_headers(&self) -> Vec<String> {
        if self.headers.is_empty() {
            default_header()
        } else {
            self.headers.clone()
        }
    }

    pub fn field_map(&self) -> FieldMap {
        FieldMap::from_header(&self.effective_headers())
    }

    /// Every row in canonical form, in source order.
    pub fn records(&self) -> Vec<CanonicalRecord> {
        let map = self.field_map();
        self.rows.iter().map(|row| map.apply(row)).collect()
    }
}

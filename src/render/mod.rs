// src/render/mod.rs
//! Projection of a catalog onto display rows.
//!
//! Rendering is pure: it reads a cart snapshot taken by the caller and
//! returns data. Writing rows to a screen or page is someone else's job.

use crate::cart::{self, CartItem};
use crate::process::{display_header, display_order, FieldMap};
use crate::schema::CanonicalRecord;

/// Separator between field values in the search haystack, so a query cannot
/// match across the boundary of two fields.
const HAYSTACK_SEP: &str = "\u{1f}";

/// One catalog row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub record: CanonicalRecord,
    /// Source cells in display column order.
    pub cells: Vec<String>,
    /// Whether the `(course, section)` pair was in the cart snapshot.
    pub in_cart: bool,
    /// Badge text: the selected term filter if any, else the row's own term.
    pub term_label: String,
    haystack: String,
}

impl RenderedRow {
    /// Label for the per-row select affordance.
    pub fn action_label(&self) -> &'static str {
        if self.in_cart {
            "Added"
        } else {
            "Add"
        }
    }

    /// Lowercased visible field values, used by text search.
    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// Display header plus rendered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTable {
    pub columns: Vec<String>,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render `rows` against `header` and a cart snapshot.
///
/// Rows with an empty course are skipped. Same inputs, same output.
pub fn render(
    header: &[String],
    rows: &[Vec<String>],
    cart: &[CartItem],
    selected_term: &str,
) -> RenderedTable {
    let map = FieldMap::from_header(header);
    let order = display_order(header);
    let selected_term = selected_term.trim();

    let rows = rows
        .iter()
        .filter_map(|row| {
            let record = map.apply(row);
            if record.course.is_empty() {
                return None;
            }
            let cells = order
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect();
            let haystack = map
                .mapped()
                .map(|f| record.get(f).to_lowercase())
                .collect::<Vec<_>>()
                .join(HAYSTACK_SEP);
            let term_label = if selected_term.is_empty() {
                record.term.clone()
            } else {
                selected_term.to_string()
            };

            Some(RenderedRow {
                in_cart: cart::contains(cart, &record.course, &record.section),
                record,
                cells,
                term_label,
                haystack,
            })
        })
        .collect();

    RenderedTable {
        columns: display_header(header),
        rows,
    }
}

/// Distinct non-empty terms in first-seen order, for populating a term
/// picker. Terms differing only by case count once.
pub fn terms(rows: &[RenderedRow]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for row in rows {
        let term = row.record.term.trim();
        if !term.is_empty() && !out.iter().any(|t| t.to_lowercase() == term.to_lowercase()) {
            out.push(term.to_string());
        }
    }
    out
}

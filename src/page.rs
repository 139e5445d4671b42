// src/page.rs
//! One catalog page: the loaded table, where it came from, and the cart it
//! writes to. This is where user actions turn into cart mutations.

use std::fmt;
use tracing::{info, warn};

use crate::cart::{CartStore, KeyValueStore};
use crate::error::CartError;
use crate::fetch::{HtmlTable, SourceResolver};
use crate::filter::FilterState;
use crate::process::RawTable;
use crate::render::{self, RenderedTable};
use crate::schema::CanonicalRecord;

/// Where the page's rows came from; shown as a passive status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// A CSV source, with its label.
    Source(String),
    /// Every source failed; rows were read back from an existing table.
    RenderedTable(String),
    /// Nothing could be loaded.
    Empty,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::Source(label) => write!(f, "loaded from {}", label),
            CatalogOrigin::RenderedTable(label) => {
                write!(f, "catalog sources unavailable; showing existing table {}", label)
            }
            CatalogOrigin::Empty => write!(f, "catalog unavailable"),
        }
    }
}

/// Outcome of a select action on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Added,
    AlreadyInCart,
}

pub struct CatalogPage<S> {
    table: RawTable,
    origin: CatalogOrigin,
    cart: CartStore<S>,
}

impl<S: KeyValueStore> CatalogPage<S> {
    pub fn new(table: RawTable, origin: CatalogOrigin, cart: CartStore<S>) -> Self {
        Self {
            table,
            origin,
            cart,
        }
    }

    /// Resolve the catalog, falling back to `fallback` when every source
    /// fails. Never errors: the worst case is an empty page.
    pub async fn open(
        resolver: &SourceResolver,
        fallback: Option<&HtmlTable>,
        cart: CartStore<S>,
    ) -> Self {
        match resolver.resolve().await {
            Ok(resolved) => {
                return Self::new(resolved.table, CatalogOrigin::Source(resolved.source), cart)
            }
            Err(e) => warn!(error = %e, "falling back to rendered table"),
        }

        let Some(html) = fallback else {
            return Self::new(RawTable::default(), CatalogOrigin::Empty, cart);
        };
        match html.load().await {
            Ok(table) => Self::new(table, CatalogOrigin::RenderedTable(html.label()), cart),
            Err(e) => {
                warn!(error = %e, "rendered table unavailable");
                Self::new(RawTable::default(), CatalogOrigin::Empty, cart)
            }
        }
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    pub fn table(&self) -> &RawTable {
        &self.table
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Render every row against a fresh cart snapshot.
    pub fn render(&self, filter: &FilterState) -> RenderedTable {
        render::render(
            &self.table.effective_headers(),
            &self.table.rows,
            &self.cart.list(),
            &filter.term,
        )
    }

    /// Render, then keep only the rows `filter` lets through.
    pub fn view(&self, filter: &FilterState) -> RenderedTable {
        let rendered = self.render(filter);
        let rows = filter.apply(&rendered.rows).into_iter().cloned().collect();
        RenderedTable {
            columns: rendered.columns,
            rows,
        }
    }

    /// Terms available for the term picker.
    pub fn terms(&self) -> Vec<String> {
        render::terms(&self.render(&FilterState::default()).rows)
    }

    /// The catalog record for a `(course, section)` pair.
    pub fn find(&self, course: &str, section: &str) -> Option<CanonicalRecord> {
        self.table
            .records()
            .into_iter()
            .find(|r| r.is_offering(course, section))
    }

    /// The user pressed "Add" on a row. Checks membership first so a row is
    /// added at most once; on error the row stays un-added.
    pub fn select(&self, record: &CanonicalRecord) -> Result<Selection, CartError> {
        if self.cart.contains(&record.course, &record.section) {
            return Ok(Selection::AlreadyInCart);
        }
        if self.cart.add(record)? {
            info!(course = %record.course, section = %record.section, "added to cart");
            Ok(Selection::Added)
        } else {
            Ok(Selection::AlreadyInCart)
        }
    }
}

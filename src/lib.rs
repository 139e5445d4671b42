// src/lib.rs
pub mod cart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod page;
pub mod process;
pub mod render;
pub mod schema;

pub use cart::{CartItem, CartStore, FileStore, KeyValueStore, MemoryStore};
pub use config::Config;
pub use error::{CartError, CatalogError, SourceError};
pub use fetch::{CatalogSource, FileSource, HtmlTable, HttpSource, ResolvedCatalog, SourceResolver};
pub use filter::{filter, FilterState};
pub use page::{CatalogOrigin, CatalogPage, Selection};
pub use process::{normalize, parse_csv, RawTable};
pub use render::{render, RenderedRow, RenderedTable};
pub use schema::{CanonicalRecord, Field};

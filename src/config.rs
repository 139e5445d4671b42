// src/config.rs
use std::{env, path::PathBuf};

pub const DEFAULT_LOCAL_CSV: &str = "ztc_live.csv";
pub const DEFAULT_FALLBACK_HTML: &str = "ztc_index.html";
pub const DEFAULT_TABLE_SELECTOR: &str = "#courseTable";
pub const DEFAULT_CART_DIR: &str = ".ztc";
/// Storage key shared by every page that reads or writes the cart.
pub const DEFAULT_CART_KEY: &str = "wlacZtcCartV1";

/// Where the catalog comes from and where the cart lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Published sheet CSV. `None` skips the remote source.
    pub remote_url: Option<String>,
    /// Bundled CSV tried after the remote.
    pub local_csv: PathBuf,
    /// Page holding an already-rendered catalog table.
    pub fallback_html: PathBuf,
    pub table_selector: String,
    pub cart_dir: PathBuf,
    pub cart_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: None,
            local_csv: PathBuf::from(DEFAULT_LOCAL_CSV),
            fallback_html: PathBuf::from(DEFAULT_FALLBACK_HTML),
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `ZTC_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading from any lookup function.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            remote_url: get("ZTC_REMOTE_URL"),
            local_csv: get("ZTC_LOCAL_CSV").map_or(defaults.local_csv, PathBuf::from),
            fallback_html: get("ZTC_FALLBACK_HTML").map_or(defaults.fallback_html, PathBuf::from),
            table_selector: get("ZTC_TABLE_SELECTOR").unwrap_or(defaults.table_selector),
            cart_dir: get("ZTC_CART_DIR").map_or(defaults.cart_dir, PathBuf::from),
            cart_key: get("ZTC_CART_KEY").unwrap_or(defaults.cart_key),
        }
    }
}

// src/fetch/mod.rs
pub mod hydrate;
pub mod local;
pub mod remote;

pub use hydrate::HtmlTable;
pub use local::FileSource;
pub use remote::HttpSource;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{CatalogError, SourceError};
use crate::process::RawTable;

/// One origin of catalog CSV text.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs and the status line, e.g. the URL or file path.
    fn label(&self) -> String;

    /// Fetch the raw CSV text. One attempt, no retry.
    async fn fetch_text(&self) -> Result<String, SourceError>;
}

/// The first source that produced data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCatalog {
    pub table: RawTable,
    pub source: String,
}

/// Ordered fallback over catalog sources: the first source that answers and
/// parses to at least one data row wins.
#[derive(Default)]
pub struct SourceResolver {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source at the lowest priority.
    pub fn with_source(mut self, source: impl CatalogSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Remote sheet (when configured and parsable) then the bundled file.
    pub fn from_config(client: &Client, config: &Config) -> Self {
        let mut resolver = Self::new();
        if let Some(raw) = &config.remote_url {
            match Url::parse(raw) {
                Ok(url) => resolver = resolver.with_source(HttpSource::new(client.clone(), url)),
                Err(e) => warn!(url = %raw, error = %e, "ignoring unparsable remote URL"),
            }
        }
        resolver.with_source(FileSource::new(&config.local_csv))
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub async fn resolve(&self) -> Result<ResolvedCatalog, CatalogError> {
        let mut attempted = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let label = source.label();
            match load_table(source.as_ref()).await {
                Ok(table) => {
                    info!(source = %label, rows = table.rows.len(), "catalog loaded");
                    return Ok(ResolvedCatalog {
                        table,
                        source: label,
                    });
                }
                Err(e) => {
                    warn!(source = %label, error = %e, "source unavailable, trying next");
                    attempted.push(label);
                }
            }
        }

        warn!(tried = attempted.len(), "all catalog sources exhausted");
        Err(CatalogError::NoDataAvailable { attempted })
    }
}

async fn load_table(source: &dyn CatalogSource) -> Result<RawTable, SourceError> {
    let text = source.fetch_text().await?;
    let table = RawTable::from_csv(&text);
    if table.is_empty() {
        return Err(SourceError::Empty(source.label()));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct StaticSource {
        name: &'static str,
        body: Result<&'static str, u16>,
        calls: Arc<AtomicUsize>,
    }

    impl StaticSource {
        fn ok(name: &'static str, body: &'static str) -> Self {
            Self {
                name,
                body: Ok(body),
                calls: Arc::default(),
            }
        }

        fn status(name: &'static str, status: u16) -> Self {
            Self {
                name,
                body: Err(status),
                calls: Arc::default(),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for StaticSource {
        fn label(&self) -> String {
            self.name.to_string()
        }

        async fn fetch_text(&self) -> Result<String, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Ok(body) => Ok(body.to_string()),
                Err(status) => Err(SourceError::Status {
                    url: self.name.to_string(),
                    status,
                }),
            }
        }
    }

    const TWO_ROWS: &str = "Course,Term,Section\nMATH 101,Fall 2025,001\nENGL 1,Fall 2025,002\n";

    #[tokio::test]
    async fn test_first_successful_source_wins() {
        let resolver = SourceResolver::new()
            .with_source(StaticSource::ok("remote", TWO_ROWS))
            .with_source(StaticSource::ok("local", "Course\nX\n"));

        let resolved = resolver.resolve().await.unwrap();
        assert_eq!(resolved.source, "remote");
        assert_eq!(resolved.table.records().len(), 2);
    }

    #[tokio::test]
    async fn test_status_failure_falls_back_to_next_source() {
        let resolver = SourceResolver::new()
            .with_source(StaticSource::status("remote", 404))
            .with_source(StaticSource::ok("local", TWO_ROWS));

        let resolved = resolver.resolve().await.unwrap();
        assert_eq!(resolved.source, "local");
        let records = resolved.table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].course, "ENGL 1");
    }

    #[tokio::test]
    async fn test_empty_source_is_not_accepted() {
        let resolver = SourceResolver::new()
            .with_source(StaticSource::ok("remote", "\n\n"))
            .with_source(StaticSource::ok("headers-only", "Course,Section\n"))
            .with_source(StaticSource::ok("local", TWO_ROWS));

        let resolved = resolver.resolve().await.unwrap();
        assert_eq!(resolved.source, "local");
    }

    #[tokio::test]
    async fn test_exhaustion_reports_every_attempt() {
        let resolver = SourceResolver::new()
            .with_source(StaticSource::status("remote", 500))
            .with_source(StaticSource::ok("local", ""));

        match resolver.resolve().await {
            Err(CatalogError::NoDataAvailable { attempted }) => {
                assert_eq!(attempted, vec!["remote", "local"]);
            }
            Ok(r) => panic!("unexpected success from {}", r.source),
        }
    }

    #[tokio::test]
    async fn test_each_source_is_tried_once_and_later_ones_skipped() {
        let failing = StaticSource::status("remote", 503);
        let failing_calls = Arc::clone(&failing.calls);
        let good = StaticSource::ok("local", TWO_ROWS);
        let good_calls = Arc::clone(&good.calls);
        let unused = StaticSource::ok("spare", TWO_ROWS);
        let unused_calls = Arc::clone(&unused.calls);

        let resolver = SourceResolver::new()
            .with_source(failing)
            .with_source(good)
            .with_source(unused);
        resolver.resolve().await.unwrap();

        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(good_calls.load(Ordering::SeqCst), 1);
        assert_eq!(unused_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_from_config_skips_bad_or_missing_remote() {
        let client = Client::new();
        let mut config = Config::default();
        assert_eq!(SourceResolver::from_config(&client, &config).sources.len(), 1);

        config.remote_url = Some("not a url".into());
        assert_eq!(SourceResolver::from_config(&client, &config).sources.len(), 1);

        config.remote_url = Some("https://docs.example.com/pub?output=csv".into());
        assert_eq!(SourceResolver::from_config(&client, &config).sources.len(), 2);
    }
}

// src/fetch/remote.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::CatalogSource;
use crate::error::SourceError;

/// Published sheet (or any HTTP endpoint) serving CSV.
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn label(&self) -> String {
        self.url.to_string()
    }

    async fn fetch_text(&self) -> Result<String, SourceError> {
        debug!(url = %self.url, "fetching catalog");
        let http_err = |source| SourceError::Http {
            url: self.url.to_string(),
            source,
        };

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(http_err)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(http_err)
    }
}

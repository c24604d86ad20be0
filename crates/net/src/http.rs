//! HTTP client for the remote entry store

use std::time::Duration;

use async_trait::async_trait;
use moodlog_core::MoodEntry;
use reqwest::{Client, Response, Url};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::store::EntryStore;
use crate::wire::decode_listing;

/// Entry store backed by a realtime-database JSON endpoint
#[derive(Debug, Clone)]
pub struct HttpEntryStore {
    client: Client,
    url: Url,
}

impl HttpEntryStore {
    /// Build a store for `url`; `timeout` bounds each request end to end
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("unsupported scheme {}", url.scheme())));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        info!(url = %url, "Remote entry store configured");
        Ok(Self { client, url })
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl EntryStore for HttpEntryStore {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_all(&self) -> Result<Vec<MoodEntry>> {
        let response = self.client.get(self.url.clone()).send().await?;
        let body = check_status(response).await?.bytes().await?;

        let entries = decode_listing(&body)?;
        debug!(count = entries.len(), "Fetched entries");
        Ok(entries)
    }

    #[instrument(skip(self, entry), fields(url = %self.url, entry_id = %entry.id))]
    async fn append(&self, entry: &MoodEntry) -> Result<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(entry)
            .send()
            .await?;
        check_status(response).await?;

        debug!("Entry appended");
        Ok(())
    }
}

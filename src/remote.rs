//! HTTP access to the catalog and its dataset files.
use crate::error::DownloaderError;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use std::time::Duration;

pub type ByteStream = BoxStream<'static, Result<Bytes, DownloaderError>>;

/// Status, reported size and streaming body of one GET.
pub struct RemoteResponse {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

impl RemoteResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub trait Fetch {
    async fn get(&self, url: &str) -> Result<RemoteResponse, DownloaderError>;
}

/// Authenticated reqwest client. Every request carries the same Basic
/// credentials.
pub struct HttpFetch {
    client: reqwest::Client,
    username: String,
    password: String,
}

impl HttpFetch {
    pub fn new(username: &str, password: &str, timeout: Duration) -> Result<Self, DownloaderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl Fetch for HttpFetch {
    async fn get(&self, url: &str) -> Result<RemoteResponse, DownloaderError> {
        let resp = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        Ok(RemoteResponse {
            status: resp.status().as_u16(),
            content_length: resp.content_length(),
            body: resp
                .bytes_stream()
                .map_err(|e| DownloaderError::DownloadError(e.to_string()))
                .boxed(),
        })
    }
}

/// Runs a catalog search and returns the raw response body. Transport
/// failures and non-200 answers both surface as `CatalogUnreadable`.
pub async fn search(fetcher: &impl Fetch, url: &str) -> Result<String, DownloaderError> {
    info!("Searching catalog: {}", url);

    let resp = fetcher.get(url).await.map_err(|e| {
        error!("Catalog request failed: {}", e);
        DownloaderError::CatalogUnreadable
    })?;

    if !resp.is_success() {
        error!("Catalog answered with HTTP {}", resp.status);
        return Err(DownloaderError::CatalogUnreadable);
    }

    let chunks: Vec<Bytes> = resp.body.try_collect().await.map_err(|e| {
        error!("Catalog response interrupted: {}", e);
        DownloaderError::CatalogUnreadable
    })?;

    String::from_utf8(chunks.concat())
        .map_err(|e| DownloaderError::MalformedResponse(e.to_string()))
}

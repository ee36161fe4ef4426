use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use precompute_artifact::ByteStream;
use reqwest::Client;
use tracing::debug;

use crate::error::TransportError;

/// Downloads remote content.
#[async_trait]
pub trait Fetcher: Send + Sync {
  /// Download the whole body of `url`.
  ///
  /// Error statuses are errors. An empty body is returned as-is.
  async fn fetch(&self, url: &str) -> Result<Bytes, TransportError>;

  /// Download `url` as a stream of chunks.
  ///
  /// The default implementation buffers the whole body through [`Fetcher::fetch`].
  async fn stream(&self, url: &str) -> Result<ByteStream, TransportError> {
    let bytes = self.fetch(url).await?;
    Ok(precompute_artifact::once(bytes))
  }
}

/// [`Fetcher`] backed by a reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
  client: Client,
}

impl HttpFetcher {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl Fetcher for HttpFetcher {
  async fn fetch(&self, url: &str) -> Result<Bytes, TransportError> {
    debug!(url, "fetching");
    let response = self.client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?)
  }

  async fn stream(&self, url: &str) -> Result<ByteStream, TransportError> {
    debug!(url, "streaming");
    let response = self.client.get(url).send().await?.error_for_status()?;
    let stream = response
      .bytes_stream()
      .map(|chunk| chunk.map_err(|e| precompute_artifact::Error::Source(e.to_string())));
    Ok(Box::pin(stream))
  }
}

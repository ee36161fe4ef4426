use std::sync::Arc;

use bytes::Bytes;
use precompute_transport::Fetcher;
use tracing::{debug, error, info, warn};

use crate::error::DatasetError;
use crate::gateway::is_multiaddress;

/// Downloads encrypted datasets.
///
/// Multiaddress URLs are tried against each gateway in order, stopping at the
/// first one that returns content. Other URLs get a single direct attempt.
pub struct DatasetFetcher {
  fetcher: Arc<dyn Fetcher>,
  gateways: Vec<String>,
}

impl DatasetFetcher {
  /// Create a fetcher with an explicit, ordered gateway list. See
  /// [`default_gateways`](crate::default_gateways).
  pub fn with_gateways(fetcher: Arc<dyn Fetcher>, gateways: Vec<String>) -> Self {
    Self { fetcher, gateways }
  }

  /// Download the encrypted dataset at `url`.
  pub async fn fetch(&self, url: &str) -> Result<Bytes, DatasetError> {
    let content = if is_multiaddress(url) {
      self.fetch_from_gateways(url).await
    } else {
      self.try_fetch(url).await
    };

    content.ok_or_else(|| {
      error!(url, "failed to download encrypted dataset");
      DatasetError::DownloadFailed {
        url: url.to_string(),
      }
    })
  }

  async fn fetch_from_gateways(&self, multiaddress: &str) -> Option<Bytes> {
    for gateway in &self.gateways {
      debug!(gateway = %gateway, "trying to download dataset from gateway");
      let url = format!("{}{}", gateway.trim_end_matches('/'), multiaddress);
      if let Some(bytes) = self.try_fetch(&url).await {
        info!(gateway = %gateway, "downloaded dataset from gateway");
        return Some(bytes);
      }
    }
    None
  }

  /// One attempt. Errors and empty bodies both count as "no content".
  async fn try_fetch(&self, url: &str) -> Option<Bytes> {
    match self.fetcher.fetch(url).await {
      Ok(bytes) if !bytes.is_empty() => Some(bytes),
      Ok(_) => {
        warn!(url, "download returned no content");
        None
      }
      Err(e) => {
        warn!(url, error = %e, "download failed");
        None
      }
    }
  }
}

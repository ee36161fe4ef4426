use std::sync::Arc;

use precompute_artifact::Store;
use precompute_dataset::sha256_hex;
use precompute_transport::Fetcher;
use tracing::{error, info};

use crate::error::PreComputeError;

/// Name under which the input file at `url` is stored: the `0x`-prefixed
/// SHA-256 of the URL text.
pub fn file_name_from_uri(url: &str) -> String {
  sha256_hex(url.as_bytes())
}

/// Streams input files into the output store.
pub struct InputFileRetriever {
  fetcher: Arc<dyn Fetcher>,
  store: Arc<dyn Store>,
}

impl InputFileRetriever {
  pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<dyn Store>) -> Self {
    Self { fetcher, store }
  }

  /// Download `urls` in order. Stops at the first failure; files already
  /// written are left in place.
  pub async fn download_all(&self, urls: &[String]) -> Result<(), PreComputeError> {
    for url in urls {
      self.download(url).await?;
    }
    Ok(())
  }

  async fn download(&self, url: &str) -> Result<(), PreComputeError> {
    let file_name = file_name_from_uri(url);
    info!(url, file_name = %file_name, "downloading input file");

    let failed = |message: String| {
      error!(url, error = %message, "failed to download input file");
      PreComputeError::InputFileDownload {
        url: url.to_string(),
        message,
      }
    };

    let stream = self
      .fetcher
      .stream(url)
      .await
      .map_err(|e| failed(e.to_string()))?;
    self
      .store
      .put(&file_name, stream)
      .await
      .map_err(|e| failed(e.to_string()))
  }
}

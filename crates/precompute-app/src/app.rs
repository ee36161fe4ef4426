//! The pre-compute pipeline for one task.

use std::sync::Arc;

use bytes::Bytes;
use precompute_artifact::{FsStore, Store};
use precompute_config::{DatasetSecrets, PipelineConfig};
use precompute_dataset::{
  AesCbcCipher, DatasetCipher, DatasetFetcher, default_gateways, verify_and_decrypt,
};
use precompute_transport::Fetcher;
use tracing::{error, info, instrument};

use crate::error::PreComputeError;
use crate::input::InputFileRetriever;

/// Capabilities the pipeline runs on.
#[derive(Clone)]
pub struct Services {
  pub fetcher: Arc<dyn Fetcher>,
  pub cipher: Arc<dyn DatasetCipher>,
  /// Ordered gateway base URLs for multiaddress datasets.
  pub gateways: Vec<String>,
}

impl Services {
  /// AES-CBC decryption and the default gateway list.
  pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
    Self {
      fetcher,
      cipher: Arc::new(AesCbcCipher),
      gateways: default_gateways(),
    }
  }

  pub fn with_gateways(mut self, gateways: Vec<String>) -> Self {
    self.gateways = gateways;
    self
  }
}

/// Makes the dataset and input files of one task available in its output
/// folder.
pub struct PreComputeApp {
  config: PipelineConfig,
  dataset_fetcher: DatasetFetcher,
  cipher: Arc<dyn DatasetCipher>,
  store: Arc<dyn Store>,
  input_files: InputFileRetriever,
}

impl PreComputeApp {
  /// Pipeline writing into `config.output_dir`.
  pub fn new(config: PipelineConfig, services: &Services) -> Self {
    let store = Arc::new(FsStore::new(config.output_dir.clone()));
    Self::with_store(config, services, store)
  }

  pub fn with_store(config: PipelineConfig, services: &Services, store: Arc<dyn Store>) -> Self {
    Self {
      dataset_fetcher: DatasetFetcher::with_gateways(
        services.fetcher.clone(),
        services.gateways.clone(),
      ),
      cipher: services.cipher.clone(),
      input_files: InputFileRetriever::new(services.fetcher.clone(), store.clone()),
      store,
      config,
    }
  }

  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  /// Run every step in order, stopping at the first failure.
  ///
  /// If the plaintext is an archive it is saved as-is.
  #[instrument(
    name = "pre_compute_run",
    skip(self),
    fields(chain_task_id = %self.config.chain_task_id)
  )]
  pub async fn run(&self) -> Result<(), PreComputeError> {
    self.check_output_folder().await?;

    if let Some(dataset) = &self.config.dataset {
      let encrypted = self.download_encrypted_dataset(dataset).await?;
      let plain = self.decrypt_dataset(dataset, &encrypted)?;
      self.save_plain_dataset_file(dataset, plain).await?;
    }

    self.download_input_files().await
  }

  async fn check_output_folder(&self) -> Result<(), PreComputeError> {
    let path = &self.config.output_dir;
    info!(path = %path.display(), "checking output folder");

    if self.store.check_root().await {
      return Ok(());
    }
    error!(path = %path.display(), "output folder not found");
    Err(PreComputeError::OutputFolderNotFound { path: path.clone() })
  }

  async fn download_encrypted_dataset(
    &self,
    dataset: &DatasetSecrets,
  ) -> Result<Bytes, PreComputeError> {
    info!(url = %dataset.url, "downloading encrypted dataset file");
    Ok(self.dataset_fetcher.fetch(&dataset.url).await?)
  }

  fn decrypt_dataset(
    &self,
    dataset: &DatasetSecrets,
    encrypted: &[u8],
  ) -> Result<Vec<u8>, PreComputeError> {
    info!("checking encrypted dataset checksum and decrypting");
    verify_and_decrypt(
      self.cipher.as_ref(),
      encrypted,
      &dataset.checksum,
      &dataset.base64_key,
    )
    .map_err(|e| {
      error!(error = %e, "failed to open dataset");
      e.into()
    })
  }

  async fn save_plain_dataset_file(
    &self,
    dataset: &DatasetSecrets,
    plain: Vec<u8>,
  ) -> Result<(), PreComputeError> {
    info!(filename = %dataset.filename, "saving plain dataset file");
    self
      .store
      .put(&dataset.filename, precompute_artifact::once(plain))
      .await
      .map_err(|source| {
        error!(filename = %dataset.filename, error = %source, "failed to write plain dataset file");
        PreComputeError::SavingPlainDataset {
          filename: dataset.filename.clone(),
          source,
        }
      })?;
    info!("saved plain dataset file");
    Ok(())
  }

  async fn download_input_files(&self) -> Result<(), PreComputeError> {
    self.input_files.download_all(&self.config.input_files).await
  }
}

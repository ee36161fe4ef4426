use std::path::PathBuf;

use precompute_config::{ConfigError, ExitCause};
use precompute_dataset::DatasetError;

/// Failure of one pipeline step.
#[derive(Debug, thiserror::Error)]
pub enum PreComputeError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("output folder not found: {}", path.display())]
  OutputFolderNotFound { path: PathBuf },

  #[error(transparent)]
  Dataset(#[from] DatasetError),

  #[error("failed to save plain dataset file '{filename}': {source}")]
  SavingPlainDataset {
    filename: String,
    #[source]
    source: precompute_artifact::Error,
  },

  #[error("failed to download input file {url}: {message}")]
  InputFileDownload { url: String, message: String },
}

impl PreComputeError {
  /// The cause reported to the worker for this failure.
  pub fn exit_cause(&self) -> ExitCause {
    match self {
      Self::Config(e) => e
        .exit_cause()
        .unwrap_or(ExitCause::PreComputeFailedUnknownIssue),
      Self::OutputFolderNotFound { .. } => ExitCause::PreComputeOutputFolderNotFound,
      Self::Dataset(e) => e.exit_cause(),
      Self::SavingPlainDataset { .. } => ExitCause::PreComputeSavingPlainDatasetFailed,
      Self::InputFileDownload { .. } => ExitCause::PreComputeInputFileDownloadFailed,
    }
  }
}

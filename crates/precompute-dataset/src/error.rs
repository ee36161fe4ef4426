use precompute_config::ExitCause;
use thiserror::Error;

/// Errors raised while acquiring or opening the dataset.
///
/// Messages never contain key material or plaintext.
#[derive(Debug, Error)]
pub enum DatasetError {
  /// No attempt returned any content.
  #[error("failed to download encrypted dataset from {url}")]
  DownloadFailed { url: String },

  #[error("invalid dataset checksum: expected {expected}, got {actual}")]
  ChecksumMismatch { expected: String, actual: String },

  /// The dataset key is not valid base64.
  #[error("invalid dataset key encoding")]
  InvalidKey,

  #[error("failed to decrypt dataset: {source}")]
  Decryption {
    #[source]
    source: crate::cipher::CipherError,
  },
}

impl DatasetError {
  pub fn exit_cause(&self) -> ExitCause {
    match self {
      Self::DownloadFailed { .. } => ExitCause::PreComputeDatasetDownloadFailed,
      Self::ChecksumMismatch { .. } => ExitCause::PreComputeInvalidDatasetChecksum,
      Self::InvalidKey | Self::Decryption { .. } => ExitCause::PreComputeDatasetDecryptionFailed,
    }
  }
}

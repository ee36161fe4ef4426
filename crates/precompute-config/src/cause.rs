use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason a pre-compute run failed.
///
/// Serialized with the worker's wire names (`PRE_COMPUTE_DATASET_URL_MISSING`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitCause {
  // environment
  PreComputeTaskIdMissing,
  PreComputeOutputPathMissing,
  PreComputeIsDatasetRequiredMissing,
  PreComputeDatasetUrlMissing,
  PreComputeDatasetKeyMissing,
  PreComputeDatasetChecksumMissing,
  PreComputeDatasetFilenameMissing,
  PreComputeInputFilesNumberMissing,
  PreComputeAtLeastOneInputFileUrlMissing,
  // pipeline
  PreComputeOutputFolderNotFound,
  PreComputeDatasetDownloadFailed,
  PreComputeInvalidDatasetChecksum,
  PreComputeDatasetDecryptionFailed,
  PreComputeSavingPlainDatasetFailed,
  PreComputeInputFileDownloadFailed,
  // signer
  PreComputeInvalidTeeSignature,
  PreComputeWorkerAddressMissing,
  PreComputeTeeChallengePrivateKeyMissing,
  PreComputeFailedUnknownIssue,
}

impl ExitCause {
  /// Wire name of the cause, as sent to the worker API.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::PreComputeTaskIdMissing => "PRE_COMPUTE_TASK_ID_MISSING",
      Self::PreComputeOutputPathMissing => "PRE_COMPUTE_OUTPUT_PATH_MISSING",
      Self::PreComputeIsDatasetRequiredMissing => "PRE_COMPUTE_IS_DATASET_REQUIRED_MISSING",
      Self::PreComputeDatasetUrlMissing => "PRE_COMPUTE_DATASET_URL_MISSING",
      Self::PreComputeDatasetKeyMissing => "PRE_COMPUTE_DATASET_KEY_MISSING",
      Self::PreComputeDatasetChecksumMissing => "PRE_COMPUTE_DATASET_CHECKSUM_MISSING",
      Self::PreComputeDatasetFilenameMissing => "PRE_COMPUTE_DATASET_FILENAME_MISSING",
      Self::PreComputeInputFilesNumberMissing => "PRE_COMPUTE_INPUT_FILES_NUMBER_MISSING",
      Self::PreComputeAtLeastOneInputFileUrlMissing => {
        "PRE_COMPUTE_AT_LEAST_ONE_INPUT_FILE_URL_MISSING"
      }
      Self::PreComputeOutputFolderNotFound => "PRE_COMPUTE_OUTPUT_FOLDER_NOT_FOUND",
      Self::PreComputeDatasetDownloadFailed => "PRE_COMPUTE_DATASET_DOWNLOAD_FAILED",
      Self::PreComputeInvalidDatasetChecksum => "PRE_COMPUTE_INVALID_DATASET_CHECKSUM",
      Self::PreComputeDatasetDecryptionFailed => "PRE_COMPUTE_DATASET_DECRYPTION_FAILED",
      Self::PreComputeSavingPlainDatasetFailed => "PRE_COMPUTE_SAVING_PLAIN_DATASET_FAILED",
      Self::PreComputeInputFileDownloadFailed => "PRE_COMPUTE_INPUT_FILE_DOWNLOAD_FAILED",
      Self::PreComputeInvalidTeeSignature => "PRE_COMPUTE_INVALID_TEE_SIGNATURE",
      Self::PreComputeWorkerAddressMissing => "PRE_COMPUTE_WORKER_ADDRESS_MISSING",
      Self::PreComputeTeeChallengePrivateKeyMissing => {
        "PRE_COMPUTE_TEE_CHALLENGE_PRIVATE_KEY_MISSING"
      }
      Self::PreComputeFailedUnknownIssue => "PRE_COMPUTE_FAILED_UNKNOWN_ISSUE",
    }
  }
}

impl fmt::Display for ExitCause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Body of the exit report sent to the worker API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitMessage {
  pub cause: ExitCause,
}

impl ExitMessage {
  pub fn new(cause: ExitCause) -> Self {
    Self { cause }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_serialize_exit_message() {
    let message = ExitMessage::new(ExitCause::PreComputeInvalidDatasetChecksum);
    let json = serde_json::to_string(&message).unwrap();
    assert_eq!(json, r#"{"cause":"PRE_COMPUTE_INVALID_DATASET_CHECKSUM"}"#);
  }

  #[test]
  fn test_wire_name_matches_serde() {
    let causes = [
      ExitCause::PreComputeAtLeastOneInputFileUrlMissing,
      ExitCause::PreComputeTeeChallengePrivateKeyMissing,
      ExitCause::PreComputeFailedUnknownIssue,
      ExitCause::PreComputeSavingPlainDatasetFailed,
    ];
    for cause in causes {
      let json = serde_json::to_value(cause).unwrap();
      assert_eq!(json, serde_json::Value::String(cause.as_str().to_string()));
    }
  }

  #[test]
  fn test_deserialize_cause() {
    let message: ExitMessage =
      serde_json::from_str(r#"{"cause":"PRE_COMPUTE_OUTPUT_FOLDER_NOT_FOUND"}"#).unwrap();
    assert_eq!(message.cause, ExitCause::PreComputeOutputFolderNotFound);
  }
}

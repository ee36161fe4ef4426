//! Typed task configuration.

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info};

use crate::env::{
  EnvSource, IEXEC_DATASET_CHECKSUM, IEXEC_DATASET_FILENAME, IEXEC_DATASET_KEY, IEXEC_DATASET_URL,
  IEXEC_INPUT_FILE_URL_PREFIX, IEXEC_INPUT_FILES_NUMBER, IEXEC_PRE_COMPUTE_OUT,
  IS_DATASET_REQUIRED, required_var,
};
use crate::error::ConfigError;

/// Where to find the encrypted dataset and how to open it.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct DatasetSecrets {
  /// HTTP(S) URL or multiaddress (`/ipfs/...`).
  pub url: String,
  /// Base64-encoded AES key.
  pub base64_key: String,
  /// Expected SHA-256 of the encrypted bytes, hex (usually `0x`-prefixed).
  pub checksum: String,
  /// Name of the plaintext file written in the output directory.
  pub filename: String,
}

impl fmt::Debug for DatasetSecrets {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DatasetSecrets")
      .field("url", &self.url)
      .field("base64_key", &"<redacted>")
      .field("checksum", &self.checksum)
      .field("filename", &self.filename)
      .finish()
  }
}

/// Validated configuration of one pre-compute run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
  pub chain_task_id: String,
  pub output_dir: PathBuf,
  /// Present iff the task requires a dataset.
  pub dataset: Option<DatasetSecrets>,
  /// Input file URLs in declaration order.
  pub input_files: Vec<String>,
}

impl PipelineConfig {
  /// Read and validate the task configuration.
  ///
  /// Fails on the first missing variable, in this order: output dir,
  /// dataset-required flag, dataset fields, input files number, input file URLs.
  pub fn load(env: &dyn EnvSource, chain_task_id: &str) -> Result<Self, ConfigError> {
    let output_dir = PathBuf::from(required_var(env, IEXEC_PRE_COMPUTE_OUT)?);
    let is_dataset_required = required_var(env, IS_DATASET_REQUIRED)?.eq_ignore_ascii_case("true");

    let dataset = if is_dataset_required {
      Some(DatasetSecrets {
        url: required_var(env, IEXEC_DATASET_URL)?,
        base64_key: required_var(env, IEXEC_DATASET_KEY)?,
        checksum: required_var(env, IEXEC_DATASET_CHECKSUM)?,
        filename: required_var(env, IEXEC_DATASET_FILENAME)?,
      })
    } else {
      None
    };

    let raw_count = required_var(env, IEXEC_INPUT_FILES_NUMBER)?;
    // Negative counts mean no input files.
    let count: i64 = raw_count.parse().map_err(|_| {
      error!(chain_task_id, value = %raw_count, "input files number is not an integer");
      ConfigError::InvalidInputFilesNumber {
        value: raw_count.clone(),
      }
    })?;

    let input_files = (1..=count.max(0))
      .map(|i| required_var(env, &format!("{IEXEC_INPUT_FILE_URL_PREFIX}{i}")))
      .collect::<Result<Vec<_>, _>>()?;

    info!(
      chain_task_id,
      output_dir = %output_dir.display(),
      is_dataset_required,
      input_files = input_files.len(),
      "loaded pre-compute configuration"
    );

    Ok(Self {
      chain_task_id: chain_task_id.to_string(),
      output_dir,
      dataset,
      input_files,
    })
  }

  pub fn is_dataset_required(&self) -> bool {
    self.dataset.is_some()
  }
}

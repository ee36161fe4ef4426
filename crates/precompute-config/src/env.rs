//! Environment access and the variable-to-cause lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::error;

use crate::cause::ExitCause;
use crate::error::ConfigError;

pub const IEXEC_TASK_ID: &str = "IEXEC_TASK_ID";
pub const IEXEC_PRE_COMPUTE_OUT: &str = "IEXEC_PRE_COMPUTE_OUT";
pub const IS_DATASET_REQUIRED: &str = "IS_DATASET_REQUIRED";
pub const IEXEC_DATASET_URL: &str = "IEXEC_DATASET_URL";
pub const IEXEC_DATASET_KEY: &str = "IEXEC_DATASET_KEY";
pub const IEXEC_DATASET_CHECKSUM: &str = "IEXEC_DATASET_CHECKSUM";
pub const IEXEC_DATASET_FILENAME: &str = "IEXEC_DATASET_FILENAME";
pub const IEXEC_INPUT_FILES_NUMBER: &str = "IEXEC_INPUT_FILES_NUMBER";
/// Indexed from 1: `IEXEC_INPUT_FILE_URL_1`, `IEXEC_INPUT_FILE_URL_2`, ...
pub const IEXEC_INPUT_FILE_URL_PREFIX: &str = "IEXEC_INPUT_FILE_URL_";
pub const SIGN_WORKER_ADDRESS: &str = "SIGN_WORKER_ADDRESS";
pub const SIGN_TEE_CHALLENGE_PRIVATE_KEY: &str = "SIGN_TEE_CHALLENGE_PRIVATE_KEY";

static CAUSES_IF_MISSING: LazyLock<HashMap<&'static str, ExitCause>> = LazyLock::new(|| {
  HashMap::from([
    (IEXEC_TASK_ID, ExitCause::PreComputeTaskIdMissing),
    (IEXEC_PRE_COMPUTE_OUT, ExitCause::PreComputeOutputPathMissing),
    (IS_DATASET_REQUIRED, ExitCause::PreComputeIsDatasetRequiredMissing),
    (IEXEC_DATASET_URL, ExitCause::PreComputeDatasetUrlMissing),
    (IEXEC_DATASET_KEY, ExitCause::PreComputeDatasetKeyMissing),
    (IEXEC_DATASET_CHECKSUM, ExitCause::PreComputeDatasetChecksumMissing),
    (IEXEC_DATASET_FILENAME, ExitCause::PreComputeDatasetFilenameMissing),
    (IEXEC_INPUT_FILES_NUMBER, ExitCause::PreComputeInputFilesNumberMissing),
    (SIGN_WORKER_ADDRESS, ExitCause::PreComputeWorkerAddressMissing),
    (SIGN_TEE_CHALLENGE_PRIVATE_KEY, ExitCause::PreComputeTeeChallengePrivateKeyMissing),
  ])
});

/// Exit cause to report when the given variable is missing or empty.
///
/// Any `IEXEC_INPUT_FILE_URL_*` variable maps to the shared
/// [`ExitCause::PreComputeAtLeastOneInputFileUrlMissing`]. Unknown names map to `None`.
pub fn cause_if_missing(name: &str) -> Option<ExitCause> {
  if let Some(cause) = CAUSES_IF_MISSING.get(name) {
    return Some(*cause);
  }
  if name.starts_with(IEXEC_INPUT_FILE_URL_PREFIX) {
    return Some(ExitCause::PreComputeAtLeastOneInputFileUrlMissing);
  }
  None
}

/// Source of configuration variables.
///
/// The enclave passes everything (including key material) through the process
/// environment. Tests use an in-memory map instead.
pub trait EnvSource: Send + Sync {
  /// Value of the variable, or `None` if unset.
  fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
  fn var(&self, name: &str) -> Option<String> {
    std::env::var(name).ok()
  }
}

impl EnvSource for HashMap<String, String> {
  fn var(&self, name: &str) -> Option<String> {
    self.get(name).cloned()
  }
}

/// Read a variable that must be set and non-empty.
pub fn required_var(env: &dyn EnvSource, name: &str) -> Result<String, ConfigError> {
  match env.var(name) {
    Some(value) if !value.is_empty() => Ok(value),
    _ => {
      let cause = cause_if_missing(name).unwrap_or(ExitCause::PreComputeFailedUnknownIssue);
      error!(name, %cause, "required environment variable is missing or empty");
      Err(ConfigError::MissingVariable {
        name: name.to_string(),
        cause,
      })
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cause_if_missing_known_variables() {
    let expected = [
      (IEXEC_TASK_ID, ExitCause::PreComputeTaskIdMissing),
      (IEXEC_PRE_COMPUTE_OUT, ExitCause::PreComputeOutputPathMissing),
      (IS_DATASET_REQUIRED, ExitCause::PreComputeIsDatasetRequiredMissing),
      (IEXEC_DATASET_URL, ExitCause::PreComputeDatasetUrlMissing),
      (IEXEC_DATASET_KEY, ExitCause::PreComputeDatasetKeyMissing),
      (IEXEC_DATASET_CHECKSUM, ExitCause::PreComputeDatasetChecksumMissing),
      (IEXEC_DATASET_FILENAME, ExitCause::PreComputeDatasetFilenameMissing),
      (IEXEC_INPUT_FILES_NUMBER, ExitCause::PreComputeInputFilesNumberMissing),
      (SIGN_WORKER_ADDRESS, ExitCause::PreComputeWorkerAddressMissing),
      (SIGN_TEE_CHALLENGE_PRIVATE_KEY, ExitCause::PreComputeTeeChallengePrivateKeyMissing),
    ];
    for (name, cause) in expected {
      assert_eq!(cause_if_missing(name), Some(cause), "{name}");
    }
  }

  #[test]
  fn test_cause_if_missing_input_file_prefix() {
    assert_eq!(
      cause_if_missing("IEXEC_INPUT_FILE_URL_1"),
      Some(ExitCause::PreComputeAtLeastOneInputFileUrlMissing)
    );
    assert_eq!(
      cause_if_missing("IEXEC_INPUT_FILE_URL_whatever-suffix"),
      Some(ExitCause::PreComputeAtLeastOneInputFileUrlMissing)
    );
  }

  #[test]
  fn test_cause_if_missing_unknown() {
    assert_eq!(cause_if_missing("SOME_ENV_VAR"), None);
  }

  #[test]
  fn test_required_var_rejects_empty() {
    let env = HashMap::from([(IEXEC_DATASET_URL.to_string(), String::new())]);
    let err = required_var(&env, IEXEC_DATASET_URL).unwrap_err();
    assert_eq!(err.exit_cause(), Some(ExitCause::PreComputeDatasetUrlMissing));
  }

  #[test]
  fn test_required_var_returns_value() {
    let env = HashMap::from([(IEXEC_TASK_ID.to_string(), "0xabc".to_string())]);
    assert_eq!(required_var(&env, IEXEC_TASK_ID).unwrap(), "0xabc");
  }
}

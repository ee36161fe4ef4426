use thiserror::Error;

use crate::cause::ExitCause;

/// Errors raised while reading the task configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A required variable is unset or empty.
  #[error("required environment variable is missing or empty: {name} ({cause})")]
  MissingVariable { name: String, cause: ExitCause },

  /// `IEXEC_INPUT_FILES_NUMBER` is not an integer.
  /// Has no classified cause and is reported as an unknown issue.
  #[error("invalid input files number: {value:?}")]
  InvalidInputFilesNumber { value: String },
}

impl ConfigError {
  /// The classified cause, if this error has one.
  pub fn exit_cause(&self) -> Option<ExitCause> {
    match self {
      Self::MissingVariable { cause, .. } => Some(*cause),
      Self::InvalidInputFilesNumber { .. } => None,
    }
  }
}

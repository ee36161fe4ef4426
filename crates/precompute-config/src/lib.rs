//! Precompute Config
//!
//! Configuration types for the TEE pre-compute stage. Everything the stage needs
//! to know about its task arrives through environment variables set by the
//! enclave session, so this crate covers:
//!
//! - the closed set of [`ExitCause`]s reported to the worker when the stage fails
//! - the [`EnvSource`] seam used to read variables (process env or in-memory map)
//! - [`PipelineConfig`], the typed and validated task configuration
//!
//! Each required variable has its own exit cause. The lookup from variable name
//! to cause is [`cause_if_missing`].

mod cause;
mod env;
mod error;
mod pipeline;

pub use cause::{ExitCause, ExitMessage};
pub use env::{
  EnvSource, IEXEC_DATASET_CHECKSUM, IEXEC_DATASET_FILENAME, IEXEC_DATASET_KEY, IEXEC_DATASET_URL,
  IEXEC_INPUT_FILE_URL_PREFIX, IEXEC_INPUT_FILES_NUMBER, IEXEC_PRE_COMPUTE_OUT, IEXEC_TASK_ID,
  IS_DATASET_REQUIRED, ProcessEnv, SIGN_TEE_CHALLENGE_PRIVATE_KEY, SIGN_WORKER_ADDRESS,
  cause_if_missing, required_var,
};
pub use error::ConfigError;
pub use pipeline::{DatasetSecrets, PipelineConfig};

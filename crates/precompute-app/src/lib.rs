//! Precompute App
//!
//! Orchestration of the TEE pre-compute stage. [`PreComputeApp`] runs the
//! pipeline for one task:
//!
//! 1. check that the output folder exists
//! 2. if a dataset is required: download it, verify its checksum, decrypt it
//!    and save the plaintext
//! 3. download every input file
//!
//! The first failing step ends the run with that step's [`ExitCause`].
//! [`Runner`] wraps the pipeline, reports a failure to the worker and turns
//! the outcome into a [`PreComputeExit`] code.
//!
//! [`ExitCause`]: precompute_config::ExitCause

mod app;
mod error;
mod input;
mod runner;

pub use app::{PreComputeApp, Services};
pub use error::PreComputeError;
pub use input::{InputFileRetriever, file_name_from_uri};
pub use runner::{PreComputeExit, Runner};

//! Process-level entry: run the pipeline, report failures, pick the exit code.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use precompute_config::{EnvSource, ExitCause, ExitMessage, IEXEC_TASK_ID, PipelineConfig, required_var};
use precompute_signer::ChallengeSigner;
use precompute_transport::WorkerApi;
use tracing::{error, info};

use crate::app::{PreComputeApp, Services};
use crate::error::PreComputeError;

/// Outcome of a run, as seen by the process supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreComputeExit {
  Success,
  /// Failed and the cause was delivered to the worker.
  ReportedFailure,
  /// Failed and the cause could not be signed or delivered.
  UnreportedFailure,
  /// No task id, so nothing could be attempted or reported.
  TaskContextMissing,
}

impl PreComputeExit {
  pub fn code(self) -> i32 {
    match self {
      Self::Success => 0,
      Self::ReportedFailure => 1,
      Self::UnreportedFailure => 2,
      Self::TaskContextMissing => 3,
    }
  }
}

pub struct Runner {
  env: Arc<dyn EnvSource>,
  services: Services,
  worker_api: Arc<dyn WorkerApi>,
  signer: ChallengeSigner,
}

impl Runner {
  pub fn new(env: Arc<dyn EnvSource>, services: Services, worker_api: Arc<dyn WorkerApi>) -> Self {
    Self {
      signer: ChallengeSigner::new(env.clone()),
      env,
      services,
      worker_api,
    }
  }

  pub async fn run(&self) -> PreComputeExit {
    info!("pre_compute_started");

    let chain_task_id = match required_var(self.env.as_ref(), IEXEC_TASK_ID) {
      Ok(id) => id,
      Err(e) => {
        error!(error = %e, "pre_compute_failed: no task id context");
        return PreComputeExit::TaskContextMissing;
      }
    };

    let outcome = AssertUnwindSafe(self.run_pipeline(&chain_task_id))
      .catch_unwind()
      .await;
    let cause = match outcome {
      Ok(Ok(())) => {
        info!(chain_task_id = %chain_task_id, "pre_compute_completed");
        return PreComputeExit::Success;
      }
      Ok(Err(e)) => {
        let cause = e.exit_cause();
        error!(chain_task_id = %chain_task_id, %cause, error = %e, "pre_compute_failed");
        cause
      }
      Err(panic) => {
        let cause = ExitCause::PreComputeFailedUnknownIssue;
        error!(
          chain_task_id = %chain_task_id,
          %cause,
          panic = panic_message(panic.as_ref()),
          "pre_compute_failed without explicit cause"
        );
        cause
      }
    };

    self.report(&chain_task_id, cause).await
  }

  async fn run_pipeline(&self, chain_task_id: &str) -> Result<(), PreComputeError> {
    let config = PipelineConfig::load(self.env.as_ref(), chain_task_id)?;
    PreComputeApp::new(config, &self.services).run().await
  }

  async fn report(&self, chain_task_id: &str, cause: ExitCause) -> PreComputeExit {
    let authorization = match self.signer.challenge(chain_task_id) {
      Ok(token) => token,
      Err(e) => {
        error!(chain_task_id, %cause, error = %e, "failed to sign exit cause message");
        return PreComputeExit::UnreportedFailure;
      }
    };

    match self
      .worker_api
      .send_exit_cause_for_pre_compute_stage(&authorization, chain_task_id, &ExitMessage::new(cause))
      .await
    {
      Ok(()) => PreComputeExit::ReportedFailure,
      Err(e) => {
        error!(chain_task_id, %cause, error = %e, "failed to report exit cause");
        PreComputeExit::UnreportedFailure
      }
    }
  }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
  payload
    .downcast_ref::<&str>()
    .copied()
    .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
    .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_panic_message() {
    let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
    assert_eq!(panic_message(payload.as_ref()), "boom");
    let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
    assert_eq!(panic_message(payload.as_ref()), "bang");
    let payload: Box<dyn std::any::Any + Send> = Box::new(7u8);
    assert_eq!(panic_message(payload.as_ref()), "unknown panic");
  }

  #[test]
  fn test_exit_codes() {
    assert_eq!(PreComputeExit::Success.code(), 0);
    assert_eq!(PreComputeExit::ReportedFailure.code(), 1);
    assert_eq!(PreComputeExit::UnreportedFailure.code(), 2);
    assert_eq!(PreComputeExit::TaskContextMissing.code(), 3);
  }
}

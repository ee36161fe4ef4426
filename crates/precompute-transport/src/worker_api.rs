use async_trait::async_trait;
use precompute_config::ExitMessage;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::info;
use url::Url;

use crate::error::TransportError;

/// Address of the worker as seen from inside the enclave network.
pub const DEFAULT_WORKER_API_URL: &str = "http://worker:13100";

/// The worker endpoints reachable from the pre-compute enclave.
#[async_trait]
pub trait WorkerApi: Send + Sync {
  /// Report why the pre-compute stage of `chain_task_id` failed.
  ///
  /// `authorization` is the enclave challenge signature.
  async fn send_exit_cause_for_pre_compute_stage(
    &self,
    authorization: &str,
    chain_task_id: &str,
    exit_message: &ExitMessage,
  ) -> Result<(), TransportError>;
}

/// [`WorkerApi`] over HTTP: `POST {base}/compute/pre/{chainTaskId}/exit`.
///
/// The base URL is only parsed when a report is built, so a bad URL surfaces
/// as a failed report rather than at construction.
#[derive(Debug, Clone)]
pub struct WorkerApiClient {
  base_url: String,
  client: Client,
}

impl WorkerApiClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      client: Client::new(),
    }
  }

  /// URL of the pre-compute exit endpoint for a task.
  pub fn exit_url(&self, chain_task_id: &str) -> Result<Url, TransportError> {
    let invalid = |message: String| TransportError::InvalidUrl {
      url: self.base_url.clone(),
      message,
    };

    let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
    url
      .path_segments_mut()
      .map_err(|_| invalid("cannot be a base url".to_string()))?
      .pop_if_empty()
      .extend(["compute", "pre", chain_task_id, "exit"]);
    Ok(url)
  }
}

#[async_trait]
impl WorkerApi for WorkerApiClient {
  async fn send_exit_cause_for_pre_compute_stage(
    &self,
    authorization: &str,
    chain_task_id: &str,
    exit_message: &ExitMessage,
  ) -> Result<(), TransportError> {
    let url = self.exit_url(chain_task_id)?;
    info!(chain_task_id, cause = %exit_message.cause, %url, "sending exit cause");

    let response = self
      .client
      .post(url)
      .header(AUTHORIZATION, authorization)
      .json(exit_message)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(TransportError::Rejected {
        status: status.as_u16(),
      });
    }
    Ok(())
  }
}

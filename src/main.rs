mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use precompute_app::{PreComputeExit, Runner, Services};
use precompute_config::ProcessEnv;
use precompute_dataset::DEFAULT_IPFS_GATEWAYS;
use precompute_transport::{DEFAULT_WORKER_API_URL, HttpFetcher, WorkerApiClient};

/// TEE pre-compute stage: makes the dataset and input files of a task
/// available to the application enclave.
///
/// Task parameters are read from the environment. The process exits with
/// 0 (success), 1 (failure reported), 2 (failure not reported) or 3 (no task id).
#[derive(Parser)]
#[command(name = "precompute")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log level used when RUST_LOG is not set
  #[arg(long, default_value = "info")]
  log_level: String,

  /// Base URL of the worker API that receives failure reports
  #[arg(long, default_value = DEFAULT_WORKER_API_URL)]
  worker_api_url: String,

  /// IPFS gateway for multiaddress datasets, tried in the order given
  #[arg(long = "ipfs-gateway", default_values = DEFAULT_IPFS_GATEWAYS)]
  ipfs_gateways: Vec<String>,
}

fn main() {
  let cli = Cli::parse();
  logging::init(&cli.log_level);

  let code = match run(cli) {
    Ok(exit) => exit.code(),
    Err(e) => {
      error!(error = %format!("{e:#}"), "pre_compute_bootstrap_failed");
      PreComputeExit::UnreportedFailure.code()
    }
  };
  std::process::exit(code);
}

fn run(cli: Cli) -> Result<PreComputeExit> {
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("failed to build tokio runtime")?;

  let worker_api = WorkerApiClient::new(cli.worker_api_url);
  let services = Services::new(Arc::new(HttpFetcher::new())).with_gateways(cli.ipfs_gateways);
  let runner = Runner::new(Arc::new(ProcessEnv), services, Arc::new(worker_api));

  Ok(rt.block_on(runner.run()))
}

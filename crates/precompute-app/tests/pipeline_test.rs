//! Pipeline step behavior with a substituted store.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::*;
use precompute_app::{PreComputeApp, PreComputeError, Services};
use precompute_artifact::{ByteStream, Store};
use precompute_config::{ExitCause, IEXEC_DATASET_FILENAME, PipelineConfig};

/// A root that exists but refuses every write.
struct ReadOnlyStore;

#[async_trait]
impl Store for ReadOnlyStore {
  async fn check_root(&self) -> bool {
    true
  }

  async fn put(&self, _key: &str, _data: ByteStream) -> Result<(), precompute_artifact::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
  }
}

fn load(env: TestEnv) -> PipelineConfig {
  PipelineConfig::load(env.into_source().as_ref(), CHAIN_TASK_ID).unwrap()
}

#[tokio::test]
async fn test_unwritable_output_is_saving_failure() {
  let out = tempfile::tempdir().unwrap();
  let encrypted = encrypt(PLAIN_DATASET);
  let fetcher = Arc::new(FakeFetcher::default().serve(DATASET_URL, encrypted.clone()));
  let services = Services::new(fetcher.clone());
  let app = PreComputeApp::with_store(
    load(TestEnv::full_task(out.path(), &encrypted)),
    &services,
    Arc::new(ReadOnlyStore),
  );

  let err = app.run().await.unwrap_err();

  assert!(matches!(err, PreComputeError::SavingPlainDataset { .. }));
  assert_eq!(err.exit_cause(), ExitCause::PreComputeSavingPlainDatasetFailed);
  assert_eq!(fetcher.requested(), vec![DATASET_URL]);
}

#[tokio::test]
async fn test_app_writes_into_configured_output_dir() {
  let out = tempfile::tempdir().unwrap();
  let encrypted = encrypt(PLAIN_DATASET);
  let fetcher = Arc::new(
    FakeFetcher::default()
      .serve(DATASET_URL, encrypted.clone())
      .serve(INPUT_URL, INPUT_CONTENT),
  );
  let app = PreComputeApp::new(
    load(TestEnv::full_task(out.path(), &encrypted)),
    &Services::new(fetcher),
  );

  assert_eq!(app.config().output_dir, out.path());
  app.run().await.unwrap();

  assert_eq!(
    std::fs::read(out.path().join(DATASET_FILENAME)).unwrap(),
    PLAIN_DATASET
  );
}

#[tokio::test]
async fn test_empty_dataset_body_is_download_failure() {
  let out = tempfile::tempdir().unwrap();
  let encrypted = encrypt(PLAIN_DATASET);
  let fetcher = Arc::new(FakeFetcher::default().serve(DATASET_URL, Vec::new()));
  let app = PreComputeApp::new(
    load(TestEnv::full_task(out.path(), &encrypted)),
    &Services::new(fetcher),
  );

  let err = app.run().await.unwrap_err();

  assert_eq!(err.exit_cause(), ExitCause::PreComputeDatasetDownloadFailed);
}

#[tokio::test]
async fn test_dataset_filename_cannot_leave_output_dir() {
  let out = tempfile::tempdir().unwrap();
  let elsewhere = tempfile::tempdir().unwrap();
  let escaped = elsewhere.path().join("escaped.txt");
  let encrypted = encrypt(PLAIN_DATASET);

  for filename in [escaped.to_str().unwrap(), "../escaped.txt"] {
    let env = TestEnv::full_task(out.path(), &encrypted).set(IEXEC_DATASET_FILENAME, filename);
    let fetcher = Arc::new(
      FakeFetcher::default()
        .serve(DATASET_URL, encrypted.clone())
        .serve(INPUT_URL, INPUT_CONTENT),
    );
    let app = PreComputeApp::new(load(env), &Services::new(fetcher));

    let err = app.run().await.unwrap_err();

    assert_eq!(err.exit_cause(), ExitCause::PreComputeSavingPlainDatasetFailed, "{filename}");
  }

  assert!(!escaped.exists());
  assert!(!out.path().parent().unwrap().join("escaped.txt").exists());
  assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

//! Shared fakes for pre-compute integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use precompute_config::{
  EnvSource, ExitCause, ExitMessage, IEXEC_DATASET_CHECKSUM, IEXEC_DATASET_FILENAME,
  IEXEC_DATASET_KEY, IEXEC_DATASET_URL, IEXEC_INPUT_FILES_NUMBER, IEXEC_PRE_COMPUTE_OUT,
  IEXEC_TASK_ID, IS_DATASET_REQUIRED, SIGN_TEE_CHALLENGE_PRIVATE_KEY, SIGN_WORKER_ADDRESS,
};
use precompute_dataset::sha256_hex;
use precompute_transport::{Fetcher, TransportError, WorkerApi};

pub const CHAIN_TASK_ID: &str = "0xabc";
pub const WORKER_ADDRESS: &str = "0xabcdef123456789";
pub const PRIVATE_KEY: &str = "0xdd3b993ec21c71c1f6d63a5240850e0d4d8dd83ff70d29e49247958548c1d479";
pub const DATASET_URL: &str = "https://host/encrypted-data.bin";
pub const DATASET_FILENAME: &str = "plain-data.txt";
pub const PLAIN_DATASET: &[u8] = b"Some very useful data.";
pub const INPUT_URL: &str = "https://host/input.txt";
pub const INPUT_CONTENT: &[u8] = b"input file content";

const KEY: [u8; 32] = [7u8; 32];
const IV: [u8; 16] = [3u8; 16];

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// `iv || aes-256-cbc(plain)`, the layout dataset owners upload.
pub fn encrypt(plain: &[u8]) -> Vec<u8> {
  let ciphertext = Aes256CbcEnc::new_from_slices(&KEY, &IV)
    .unwrap()
    .encrypt_padded_vec_mut::<Pkcs7>(plain);
  let mut payload = IV.to_vec();
  payload.extend_from_slice(&ciphertext);
  payload
}

pub fn base64_key() -> String {
  STANDARD.encode(KEY)
}

/// Serves canned bodies and records every requested URL.
#[derive(Default)]
pub struct FakeFetcher {
  bodies: HashMap<String, Bytes>,
  requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
  pub fn serve(mut self, url: &str, body: impl Into<Bytes>) -> Self {
    self.bodies.insert(url.to_string(), body.into());
    self
  }

  pub fn requested(&self) -> Vec<String> {
    self.requested.lock().unwrap().clone()
  }
}

#[async_trait]
impl Fetcher for FakeFetcher {
  async fn fetch(&self, url: &str) -> Result<Bytes, TransportError> {
    self.requested.lock().unwrap().push(url.to_string());
    self
      .bodies
      .get(url)
      .cloned()
      .ok_or_else(|| TransportError::Rejected { status: 404 })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
  pub authorization: String,
  pub chain_task_id: String,
  pub cause: ExitCause,
}

/// Records reports; optionally rejects them all.
#[derive(Default)]
pub struct FakeWorkerApi {
  reject: bool,
  reports: Mutex<Vec<Report>>,
}

impl FakeWorkerApi {
  pub fn rejecting() -> Self {
    Self {
      reject: true,
      ..Default::default()
    }
  }

  pub fn reports(&self) -> Vec<Report> {
    self.reports.lock().unwrap().clone()
  }
}

#[async_trait]
impl WorkerApi for FakeWorkerApi {
  async fn send_exit_cause_for_pre_compute_stage(
    &self,
    authorization: &str,
    chain_task_id: &str,
    exit_message: &ExitMessage,
  ) -> Result<(), TransportError> {
    self.reports.lock().unwrap().push(Report {
      authorization: authorization.to_string(),
      chain_task_id: chain_task_id.to_string(),
      cause: exit_message.cause,
    });
    if self.reject {
      return Err(TransportError::Rejected { status: 500 });
    }
    Ok(())
  }
}

/// In-memory environment builder.
#[derive(Default, Clone)]
pub struct TestEnv(HashMap<String, String>);

impl TestEnv {
  /// Task id and signing identity only.
  pub fn base() -> Self {
    Self::default()
      .set(IEXEC_TASK_ID, CHAIN_TASK_ID)
      .set(SIGN_WORKER_ADDRESS, WORKER_ADDRESS)
      .set(SIGN_TEE_CHALLENGE_PRIVATE_KEY, PRIVATE_KEY)
  }

  /// A full task: dataset required, one input file, output in `out`.
  pub fn full_task(out: &std::path::Path, encrypted: &[u8]) -> Self {
    Self::base()
      .set(IEXEC_PRE_COMPUTE_OUT, out.to_str().unwrap())
      .set(IS_DATASET_REQUIRED, "true")
      .set(IEXEC_DATASET_URL, DATASET_URL)
      .set(IEXEC_DATASET_KEY, &base64_key())
      .set(IEXEC_DATASET_CHECKSUM, &sha256_hex(encrypted))
      .set(IEXEC_DATASET_FILENAME, DATASET_FILENAME)
      .set(IEXEC_INPUT_FILES_NUMBER, "1")
      .set("IEXEC_INPUT_FILE_URL_1", INPUT_URL)
  }

  pub fn set(mut self, name: &str, value: &str) -> Self {
    self.0.insert(name.to_string(), value.to_string());
    self
  }

  pub fn remove(mut self, name: &str) -> Self {
    self.0.remove(name);
    self
  }

  pub fn into_source(self) -> Arc<dyn EnvSource> {
    Arc::new(self.0)
  }
}

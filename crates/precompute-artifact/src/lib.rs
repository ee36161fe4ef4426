//! Precompute Artifact
//!
//! Storage for the files the pre-compute stage hands over to the application
//! enclave: the plaintext dataset and the downloaded input files.
//!
//! The [`Store`] trait is the write side of that hand-over. [`FsStore`] writes
//! into the output folder mounted in the enclave. It never creates the folder:
//! if the folder is gone, writes fail.
//!
//! Data is passed as a [`ByteStream`] so input files can be piped from the
//! network to disk without buffering them whole.

mod fs;

pub use fs::FsStore;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of bytes for artifact data.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// Error type for artifact storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The upstream producer of the byte stream failed.
  #[error("source stream failed: {0}")]
  Source(String),

  /// The key is not a single plain file name.
  #[error("invalid artifact key: {key:?}")]
  InvalidKey { key: String },

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Wrap an in-memory buffer as a single-chunk [`ByteStream`].
pub fn once(data: impl Into<Bytes>) -> ByteStream {
  let data: Bytes = data.into();
  Box::pin(futures::stream::once(async move { Ok(data) }))
}

/// Artifact storage trait.
#[async_trait]
pub trait Store: Send + Sync {
  /// Whether the storage root exists and is usable.
  async fn check_root(&self) -> bool;

  /// Store an artifact under `key`, replacing any previous content.
  async fn put(&self, key: &str, data: ByteStream) -> Result<(), Error>;
}

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::{ByteStream, Error, Store};

/// Filesystem-based artifact store.
///
/// Each artifact is stored at `{base_path}/{key}`. The base path must already
/// exist.
pub struct FsStore {
  base_path: PathBuf,
}

impl FsStore {
  /// Create a new filesystem store with the given base path.
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  /// Path of `key` inside the base path. Keys must name a file directly in
  /// the base path: no separators, no `..`, nothing absolute.
  fn key_to_path(&self, key: &str) -> Result<PathBuf, Error> {
    let mut components = Path::new(key).components();
    match (components.next(), components.next()) {
      (Some(Component::Normal(name)), None) if name == key => Ok(self.base_path.join(name)),
      _ => Err(Error::InvalidKey {
        key: key.to_string(),
      }),
    }
  }
}

#[async_trait]
impl Store for FsStore {
  async fn check_root(&self) -> bool {
    fs::metadata(&self.base_path)
      .await
      .map(|m| m.is_dir())
      .unwrap_or(false)
  }

  async fn put(&self, key: &str, data: ByteStream) -> Result<(), Error> {
    let path = self.key_to_path(key)?;

    let mut file = File::create(path).await?;
    let mut stream = std::pin::pin!(data);

    while let Some(chunk) = stream.next().await {
      let bytes = chunk?;
      file.write_all(&bytes).await?;
    }

    file.flush().await?;
    Ok(())
  }
}

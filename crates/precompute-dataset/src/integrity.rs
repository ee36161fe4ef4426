use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use tracing::{error, info};

use crate::cipher::DatasetCipher;
use crate::error::DatasetError;

/// SHA-256 of `bytes` as `0x`-prefixed lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
  format!("0x{}", hex::encode(Sha256::digest(bytes)))
}

/// Check `bytes` against the expected checksum.
///
/// The comparison is case-sensitive. An expected value without the `0x`
/// prefix is compared against the bare hex digest.
pub fn verify_checksum(bytes: &[u8], expected: &str) -> Result<(), DatasetError> {
  let actual = sha256_hex(bytes);
  let matches = if expected.starts_with("0x") {
    actual == expected
  } else {
    actual[2..] == *expected
  };

  if matches {
    return Ok(());
  }
  error!(expected, actual = %actual, "invalid dataset checksum");
  Err(DatasetError::ChecksumMismatch {
    expected: expected.to_string(),
    actual,
  })
}

/// Verify the checksum of the encrypted bytes, then decrypt them.
///
/// `cipher` is only called once the checksum matched.
pub fn verify_and_decrypt(
  cipher: &dyn DatasetCipher,
  encrypted: &[u8],
  expected_checksum: &str,
  base64_key: &str,
) -> Result<Vec<u8>, DatasetError> {
  verify_checksum(encrypted, expected_checksum)?;

  let key = STANDARD
    .decode(base64_key.trim())
    .map_err(|_| DatasetError::InvalidKey)?;
  let plain = cipher
    .decrypt(encrypted, &key)
    .map_err(|source| DatasetError::Decryption { source })?;

  info!(size = plain.len(), "decrypted dataset");
  Ok(plain)
}

//! Symmetric decryption of dataset payloads.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use thiserror::Error;

/// Length of the IV prepended to every encrypted payload.
pub const IV_LEN: usize = 16;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

#[derive(Debug, Error)]
pub enum CipherError {
  #[error("unsupported key length: {0} bytes")]
  InvalidKeyLength(usize),

  #[error("invalid payload length: {0} bytes")]
  InvalidPayloadLength(usize),

  #[error("invalid padding")]
  Padding,
}

/// Decrypts an encrypted payload with a raw key.
pub trait DatasetCipher: Send + Sync {
  fn decrypt(&self, payload: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// AES-CBC with PKCS#7 padding.
///
/// Payload layout is `iv (16 bytes) || ciphertext`. Keys of 16, 24 and 32 bytes
/// select AES-128, AES-192 and AES-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbcCipher;

impl DatasetCipher for AesCbcCipher {
  fn decrypt(&self, payload: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    if payload.len() <= IV_LEN || (payload.len() - IV_LEN) % IV_LEN != 0 {
      return Err(CipherError::InvalidPayloadLength(payload.len()));
    }
    let (iv, ciphertext) = payload.split_at(IV_LEN);

    let plain = match key.len() {
      16 => Aes128CbcDec::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
      24 => Aes192CbcDec::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
      32 => Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
      n => return Err(CipherError::InvalidKeyLength(n)),
    };

    plain.map_err(|_| CipherError::Padding)
  }
}

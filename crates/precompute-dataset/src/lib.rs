//! Precompute Dataset
//!
//! Everything between "the task references an encrypted dataset" and "the
//! plaintext is in memory":
//!
//! 1. [`DatasetFetcher`] downloads the encrypted bytes, falling back across IPFS
//!    gateways when the URL is a multiaddress.
//! 2. [`verify_checksum`] compares the SHA-256 of those bytes with the expected
//!    checksum.
//! 3. A [`DatasetCipher`] decrypts them with the task's dataset key.
//!
//! [`verify_and_decrypt`] chains steps 2 and 3 and never calls the cipher on
//! bytes whose checksum did not match.

mod cipher;
mod error;
mod fetcher;
mod gateway;
mod integrity;

pub use cipher::{AesCbcCipher, CipherError, DatasetCipher, IV_LEN};
pub use error::DatasetError;
pub use fetcher::DatasetFetcher;
pub use gateway::{DEFAULT_IPFS_GATEWAYS, default_gateways, is_multiaddress};
pub use integrity::{sha256_hex, verify_and_decrypt, verify_checksum};

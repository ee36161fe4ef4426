//! Precompute Signer
//!
//! Produces the enclave challenge that authorizes exit cause reports. The
//! challenge is an Ethereum-style recoverable secp256k1 signature over
//! `keccak256(chainTaskId || workerAddress)`, made with the enclave's
//! challenge private key.

mod challenge;
mod crypto;
mod error;

pub use challenge::{ChallengeIdentity, ChallengeSigner, SignedChallenge, sign_enclave_challenge};
pub use crypto::{
  address_from_private_key, concatenate_and_hash, hex_to_bytes, is_expected_signer, keccak256,
  recover_signer, sign_message_hash,
};
pub use error::SignerError;

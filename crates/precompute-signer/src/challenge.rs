use std::fmt;
use std::sync::Arc;

use precompute_config::{EnvSource, SIGN_TEE_CHALLENGE_PRIVATE_KEY, SIGN_WORKER_ADDRESS, required_var};
use tracing::{error, instrument};

use crate::crypto::{address_from_private_key, concatenate_and_hash, is_expected_signer, sign_message_hash};
use crate::error::SignerError;

/// A signature together with what it signs and who signed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedChallenge {
  pub message_hash: String,
  pub signature: String,
  pub signer_address: String,
}

/// Sign `message_hash` and check that the result recovers to the key's own
/// address before handing it out.
pub fn sign_enclave_challenge(
  message_hash: &str,
  private_key: &str,
) -> Result<SignedChallenge, SignerError> {
  let signer_address = address_from_private_key(private_key)?;
  let signature = sign_message_hash(message_hash, private_key)?;

  verify_signer(message_hash, &signature, &signer_address)?;

  Ok(SignedChallenge {
    message_hash: message_hash.to_string(),
    signature,
    signer_address,
  })
}

fn verify_signer(message_hash: &str, signature: &str, expected: &str) -> Result<(), SignerError> {
  if is_expected_signer(message_hash, signature, expected) {
    return Ok(());
  }
  error!(message_hash, expected, "failed to verify enclave challenge signature");
  Err(SignerError::SignerMismatch)
}

/// Worker address and enclave challenge key, read together from the
/// environment.
#[derive(Clone)]
pub struct ChallengeIdentity {
  pub worker_address: String,
  pub private_key: String,
}

impl ChallengeIdentity {
  pub fn from_env(env: &dyn EnvSource) -> Result<Self, SignerError> {
    Ok(Self {
      worker_address: required_var(env, SIGN_WORKER_ADDRESS)?,
      private_key: required_var(env, SIGN_TEE_CHALLENGE_PRIVATE_KEY)?,
    })
  }
}

impl fmt::Debug for ChallengeIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ChallengeIdentity")
      .field("worker_address", &self.worker_address)
      .field("private_key", &"<redacted>")
      .finish()
  }
}

/// Builds challenges from the identity found in the environment.
pub struct ChallengeSigner {
  env: Arc<dyn EnvSource>,
}

impl ChallengeSigner {
  pub fn new(env: Arc<dyn EnvSource>) -> Self {
    Self { env }
  }

  /// Authorization token for reports about `chain_task_id`.
  #[instrument(skip(self))]
  pub fn challenge(&self, chain_task_id: &str) -> Result<String, SignerError> {
    let identity = ChallengeIdentity::from_env(self.env.as_ref())?;
    let message_hash = concatenate_and_hash(&[chain_task_id, &identity.worker_address])?;
    Ok(sign_enclave_challenge(&message_hash, &identity.private_key)?.signature)
  }
}

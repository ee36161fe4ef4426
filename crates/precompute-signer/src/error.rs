use precompute_config::{ConfigError, ExitCause};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("invalid hex value for {what}")]
  InvalidHex { what: &'static str },

  #[error("invalid challenge private key")]
  InvalidPrivateKey,

  #[error("invalid signature: {message}")]
  InvalidSignature { message: String },

  /// The produced signature does not recover to the signing key's address.
  #[error("signature does not match the expected signer")]
  SignerMismatch,
}

impl SignerError {
  pub fn exit_cause(&self) -> ExitCause {
    match self {
      Self::Config(e) => e
        .exit_cause()
        .unwrap_or(ExitCause::PreComputeFailedUnknownIssue),
      _ => ExitCause::PreComputeInvalidTeeSignature,
    }
  }
}

//! Keccak hashing and recoverable secp256k1 signatures, Ethereum flavored.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};

use crate::error::SignerError;

const ETH_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";
const SIGNATURE_LEN: usize = 65;

/// Decode a hex string, with or without `0x`. Odd-length input is left-padded
/// with a `0` nibble.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
  let clean = value
    .strip_prefix("0x")
    .or_else(|| value.strip_prefix("0X"))
    .unwrap_or(value);
  if clean.len() % 2 == 1 {
    hex::decode(format!("0{clean}"))
  } else {
    hex::decode(clean)
  }
}

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
  Keccak256::digest(bytes).into()
}

/// Keccak-256 of the concatenated byte values of `hex_parts`, as `0x` hex.
pub fn concatenate_and_hash(hex_parts: &[&str]) -> Result<String, SignerError> {
  let mut bytes = Vec::new();
  for part in hex_parts {
    let decoded = hex_to_bytes(part).map_err(|_| SignerError::InvalidHex { what: "hash input" })?;
    bytes.extend_from_slice(&decoded);
  }
  Ok(format!("0x{}", hex::encode(keccak256(&bytes))))
}

/// Digest actually signed: the message hash wrapped in the Ethereum signed
/// message envelope.
fn signing_digest(message_hash: &str) -> Result<Message, SignerError> {
  let hash = hex_to_bytes(message_hash).map_err(|_| SignerError::InvalidHex {
    what: "message hash",
  })?;
  let mut envelope = ETH_MESSAGE_PREFIX.to_vec();
  envelope.extend_from_slice(&hash);
  Ok(Message::from_digest(keccak256(&envelope)))
}

fn secret_key(private_key: &str) -> Result<SecretKey, SignerError> {
  let bytes = hex_to_bytes(private_key).map_err(|_| SignerError::InvalidPrivateKey)?;
  SecretKey::from_slice(&bytes).map_err(|_| SignerError::InvalidPrivateKey)
}

fn address_from_public_key(public_key: &PublicKey) -> String {
  let uncompressed = public_key.serialize_uncompressed();
  let hash = keccak256(&uncompressed[1..]);
  format!("0x{}", hex::encode(&hash[12..]))
}

/// Lowercase `0x` address of the key pair behind `private_key`.
pub fn address_from_private_key(private_key: &str) -> Result<String, SignerError> {
  let secp = Secp256k1::signing_only();
  let public_key = PublicKey::from_secret_key(&secp, &secret_key(private_key)?);
  Ok(address_from_public_key(&public_key))
}

/// Sign `message_hash` and return `0x || r || s || v`, with `v` in {27, 28}.
pub fn sign_message_hash(message_hash: &str, private_key: &str) -> Result<String, SignerError> {
  let secp = Secp256k1::signing_only();
  let message = signing_digest(message_hash)?;
  let signature = secp.sign_ecdsa_recoverable(&message, &secret_key(private_key)?);
  let (recovery_id, compact) = signature.serialize_compact();

  let mut bytes = Vec::with_capacity(SIGNATURE_LEN);
  bytes.extend_from_slice(&compact);
  bytes.push(27 + recovery_id.to_i32() as u8);
  Ok(format!("0x{}", hex::encode(bytes)))
}

/// Address recovered from a signature over `message_hash`.
pub fn recover_signer(message_hash: &str, signature: &str) -> Result<String, SignerError> {
  let invalid = |message: &str| SignerError::InvalidSignature {
    message: message.to_string(),
  };

  let bytes = hex_to_bytes(signature).map_err(|_| invalid("not hex"))?;
  if bytes.len() != SIGNATURE_LEN {
    return Err(invalid("expected 65 bytes"));
  }
  let v = bytes[64];
  let recovery = if v >= 27 { v - 27 } else { v };
  let recovery_id = RecoveryId::from_i32(i32::from(recovery)).map_err(|_| invalid("bad v"))?;
  let signature =
    RecoverableSignature::from_compact(&bytes[..64], recovery_id).map_err(|_| invalid("bad r or s"))?;

  let secp = Secp256k1::verification_only();
  let public_key = secp
    .recover_ecdsa(&signing_digest(message_hash)?, &signature)
    .map_err(|_| invalid("recovery failed"))?;
  Ok(address_from_public_key(&public_key))
}

/// Whether `signature` over `message_hash` was made by `address`.
/// Addresses compare case-insensitively.
pub fn is_expected_signer(message_hash: &str, signature: &str, address: &str) -> bool {
  recover_signer(message_hash, signature)
    .map(|recovered| recovered.eq_ignore_ascii_case(address))
    .unwrap_or(false)
}

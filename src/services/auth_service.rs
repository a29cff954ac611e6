// src/services/auth_service.rs

//! Credential hashing, verification, and session-token minting.
//!
//! Passwords and admin secret keys both go through Argon2 with per-hash
//! random salts; session tokens are 256 bits from the OS RNG, hex-encoded.

use crate::errors::AppError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use rand_core::RngCore;
use tracing::{debug, error, instrument};

/// Hashes a plain-text credential (password or secret key) using Argon2.
#[instrument(name = "auth_service::hash_credential", skip(credential), err(Display))]
pub fn hash_credential(credential: &str) -> Result<String, AppError> {
  if credential.is_empty() {
    return Err(AppError::Validation("Credential cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default();

  match argon2_hasher.hash_password(credential.as_bytes(), &salt) {
    Ok(hash_obj) => Ok(hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 hashing failed.");
      Err(AppError::Internal(format!("Credential hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text credential against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch; an `Err` only for malformed stored
/// hashes or internal verifier failures.
#[instrument(
  name = "auth_service::verify_credential",
  skip(stored_hash, provided),
  err(Display),
  fields(hash_len = stored_hash.len())
)]
pub fn verify_credential(stored_hash: &str, provided: &str) -> Result<bool, AppError> {
  if stored_hash.is_empty() {
    return Err(AppError::Auth("Invalid stored credential format (empty).".to_string()));
  }
  if provided.is_empty() {
    return Err(AppError::Auth("Provided credential for verification cannot be empty.".to_string()));
  }

  let parsed_hash = match PasswordHash::new(stored_hash) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored credential hash string.");
      return Err(AppError::Internal(format!("Invalid stored credential hash format: {}", parse_err)));
    }
  };

  let argon2_verifier = Argon2::default();

  match argon2_verifier.verify_password(provided.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Credential verification failed: values do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 verification process encountered an error.");
      Err(AppError::Internal(format!("Credential verification process failed: {}", other_argon_err)))
    }
  }
}

/// Mints an opaque 256-bit session token from the OS RNG.
pub fn mint_session_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify_round_trip() {
    let hash = hash_credential("hunter2-but-longer").unwrap();
    assert!(verify_credential(&hash, "hunter2-but-longer").unwrap());
    assert!(!verify_credential(&hash, "wrong-password").unwrap());
  }

  #[test]
  fn empty_credential_is_rejected() {
    assert!(hash_credential("").is_err());
  }

  #[test]
  fn minted_tokens_are_256_bit_hex_and_unique() {
    let a = mint_session_token();
    let b = mint_session_token();
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
  }
}

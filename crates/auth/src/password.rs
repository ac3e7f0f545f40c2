//! Salted credential hashing (PBKDF2-HMAC-SHA256).
//!
//! Stored format: `pbkdf2:sha256:<iterations>$<salt>$<hash>` with URL-safe
//! unpadded base64 for the salt and hash. Verification reads the iteration
//! count back from the stored value, so the constant below can be raised
//! without invalidating existing credentials.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260_000;
const SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;

/// Failure while hashing or verifying a credential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("stored credential has an invalid format")]
    InvalidFormat,
    #[error("stored credential could not be decoded")]
    Decode,
    #[error("hash computation failed")]
    Hash,
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .map_err(|_| PasswordError::Hash)?;

    let salt_b64 = URL_SAFE_NO_PAD.encode(salt);
    let hash_b64 = URL_SAFE_NO_PAD.encode(key);

    Ok(format!("pbkdf2:sha256:{ITERATIONS}${salt_b64}${hash_b64}"))
}

/// Verify a password against a stored hash string.
///
/// Returns `Ok(false)` on a mismatch; errors are reserved for stored values
/// this module never produced.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.splitn(3, '$');
    let header = parts.next().ok_or(PasswordError::InvalidFormat)?;
    let salt_b64 = parts.next().ok_or(PasswordError::InvalidFormat)?;
    let hash_b64 = parts.next().ok_or(PasswordError::InvalidFormat)?;

    let mut header_parts = header.split(':');
    if header_parts.next() != Some("pbkdf2") || header_parts.next() != Some("sha256") {
        return Err(PasswordError::InvalidFormat);
    }
    let iterations: u32 = header_parts
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or(PasswordError::InvalidFormat)?;
    if iterations == 0 || header_parts.next().is_some() {
        return Err(PasswordError::InvalidFormat);
    }

    let salt = URL_SAFE_NO_PAD
        .decode(salt_b64)
        .map_err(|_| PasswordError::Decode)?;
    let expected = URL_SAFE_NO_PAD
        .decode(hash_b64)
        .map_err(|_| PasswordError::Decode)?;
    if salt.is_empty() || expected.is_empty() {
        return Err(PasswordError::Decode);
    }

    let mut computed = vec![0u8; expected.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|_| PasswordError::Hash)?;

    Ok(constant_time_eq(&computed, &expected))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_succeeds() {
        let stored = hash_password("admin123").unwrap();
        assert!(stored.starts_with("pbkdf2:sha256:"));
        assert!(verify_password("admin123", &stored).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let stored = hash_password("admin123").unwrap();
        assert!(!verify_password("admin124", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn salts_are_random_per_hash() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-password", &a).unwrap());
        assert!(verify_password("same-password", &b).unwrap());
    }

    #[test]
    fn malformed_stored_value_is_an_error() {
        for stored in [
            "",
            "plaintext",
            "pbkdf2:sha256:abc$salt$hash",
            "pbkdf2:md5:1000$c2FsdA$aGFzaA",
            "pbkdf2:sha256:0$c2FsdA$aGFzaA",
            "pbkdf2:sha256:1000$salt-only",
        ] {
            assert!(verify_password("x", stored).is_err(), "accepted {stored:?}");
        }
    }

    #[test]
    fn undecodable_base64_is_an_error() {
        let err = verify_password("x", "pbkdf2:sha256:1000$!!$!!").unwrap_err();
        assert_eq!(err, PasswordError::Decode);
    }
}

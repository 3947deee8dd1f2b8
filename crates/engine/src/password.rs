//! Salted one-way password hashing (argon2, PHC string format).

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::{EngineError, ResultEngine};

/// Hashes `password` with a fresh random salt.
pub(crate) fn hash(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Password(err.to_string()))
}

/// Checks `password` against a stored PHC hash.
///
/// A hash that cannot be parsed is reported as an error, not as a mismatch.
pub(crate) fn verify(password: &str, stored: &str) -> ResultEngine<bool> {
    let parsed = PasswordHash::new(stored).map_err(|err| EngineError::Password(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let stored = hash("hunter2").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(verify("hunter2", &stored).unwrap());
        assert!(!verify("hunter3", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash("secret").unwrap(), hash("secret").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify("secret", "secret"),
            Err(EngineError::Password(_))
        ));
    }
}

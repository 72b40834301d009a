//! Argon2 password hashing for member accounts.

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use rand::rngs::OsRng;
use stockboard_core::errors::{Error as CoreError, Result};
use stockboard_core::users::PasswordHasherTrait;

/// Stores passwords as Argon2id PHC strings.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasherTrait for Argon2Hasher {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::Unexpected(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| CoreError::Unexpected(format!("Stored password hash is invalid: {}", e)))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(CoreError::Unexpected(format!(
                "Failed to verify password: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash_password("secret1").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify_password("secret1", &hash).unwrap());
        assert!(!hasher.verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = Argon2Hasher::new();
        assert_ne!(
            hasher.hash_password("secret1").unwrap(),
            hasher.hash_password("secret1").unwrap()
        );
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let hasher = Argon2Hasher::new();
        assert!(hasher.verify_password("secret1", "not-a-phc-string").is_err());
    }
}

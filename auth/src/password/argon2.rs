use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Argon2id password hasher used by identity stores to own credentials.
///
/// Hashes are PHC strings, so parameters and salt travel with the stored value.
#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable stored hash is an error.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2id_phc() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("Pa$$w0rd").expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_rejects_other_passwords() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Pa$$w0rd").unwrap();

        assert!(hasher.verify("Pa$$w0rd", &hash).unwrap());
        assert!(!hasher.verify("pa$$w0rd", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("Pa$$w0rd").unwrap();
        let second = hasher.hash("Pa$$w0rd").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_unreadable_hash() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("Pa$$w0rd", "plaintext-in-the-database");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }
}

//! Password Hashing
//!
//! Argon2id with cost parameters from configuration, tuned so verification
//! takes tens of milliseconds.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Argon2, Params,
};

use crate::config::AppConfig;
use crate::error::ApiError;

/// One-way salted password hasher
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
}

impl PasswordHasher {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            memory_cost: config.argon2_memory_cost,
            time_cost: config.argon2_time_cost,
            parallelism: config.argon2_parallelism,
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, ApiError> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| ApiError::Internal)?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }

    /// Hash a plaintext password into a PHC string with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2()?.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// The salt and cost embedded in `hash` drive the recomputation. A
    /// malformed hash string yields `false`, never an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        let Ok(argon2) = self.argon2() else {
            return false;
        };
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&AppConfig::for_tests())
    }

    #[test]
    fn hash_then_verify_roundtrip() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hasher.verify("secret1", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").unwrap();
        assert!(!hasher.verify("secret2", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = hasher();
        assert_ne!(hasher.hash("secret1").unwrap(), hasher.hash("secret1").unwrap());
    }

    #[test]
    fn malformed_hash_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("secret1", "not-a-phc-string"));
        assert!(!hasher.verify("secret1", ""));
    }
}

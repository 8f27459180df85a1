//! Application Configuration
//!
//! All configuration values are loaded from environment variables.
//! No hardcoded secrets or sensitive data.

use crate::error::ApiError;
use std::env;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JWT secret key for signing tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// Token validity window in seconds (from TOKEN_EXPIRATION env var)
    pub token_expiration: i64,

    /// JWT issuer (from JWT_ISSUER env var)
    pub jwt_issuer: String,

    /// Argon2 memory cost in KiB (from ARGON2_MEMORY_COST env var)
    pub argon2_memory_cost: u32,

    /// Argon2 time cost (iterations) (from ARGON2_TIME_COST env var)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (from ARGON2_PARALLELISM env var)
    pub argon2_parallelism: u32,

    /// Minimum password length (from MIN_PASSWORD_LENGTH env var)
    pub min_password_length: usize,

    /// Default page size for post listings (from POSTS_PER_PAGE env var)
    pub posts_per_page: i64,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Panics
    /// Panics if JWT_SECRET environment variable is not set
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET environment variable must be set"),

            token_expiration: env::var("TOKEN_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400), // 24 hours default

            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "quillpress".to_string()),

            argon2_memory_cost: env::var("ARGON2_MEMORY_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(65536), // 64 MiB

            argon2_time_cost: env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),

            argon2_parallelism: env::var("ARGON2_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),

            min_password_length: env::var("MIN_PASSWORD_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),

            posts_per_page: env::var("POSTS_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.jwt_secret.len() < 32 {
            return Err(ApiError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if self.token_expiration <= 0 {
            return Err(ApiError::Config(
                "TOKEN_EXPIRATION must be positive".to_string(),
            ));
        }

        if self.min_password_length < 6 {
            return Err(ApiError::Config(
                "MIN_PASSWORD_LENGTH must be at least 6".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
impl AppConfig {
    /// Configuration with cheap argon2 parameters for fast tests
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret-key-that-is-long-enough!".to_string(),
            token_expiration: 86400,
            jwt_issuer: "quillpress-test".to_string(),
            argon2_memory_cost: 8192,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
            min_password_length: 6,
            posts_per_page: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = AppConfig::for_tests();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_secret() {
        let config = AppConfig {
            jwt_secret: "short".to_string(),
            ..AppConfig::for_tests()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_nonpositive_expiration() {
        let config = AppConfig {
            token_expiration: 0,
            ..AppConfig::for_tests()
        };
        assert!(config.validate().is_err());
    }
}

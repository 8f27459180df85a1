//! Token Service
//!
//! Issues and verifies stateless HS256-signed identity tokens. Validity is
//! recomputed from signature and expiry on every use; nothing is persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ApiError;

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: the user id, serialized as a string. The signing scheme's
    /// identity claim is string-typed even though the store key is numeric.
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Unique token identifier
    pub jti: Uuid,
}

/// Signs and verifies identity tokens with a server-held secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiration: i64,
}

impl TokenService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            expiration: config.token_expiration,
        }
    }

    /// Validity window in seconds, for `expires_in` response fields
    pub fn expiration(&self) -> i64 {
        self.expiration
    }

    /// Issue a signed token with the user id as subject
    pub fn issue(&self, user_id: i64) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiration);

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and extract the subject's user id.
    ///
    /// A bad signature, an elapsed expiry, or structural garbage all map to
    /// the unauthenticated class. A correctly signed token whose subject is
    /// not numeric indicates a server-side bug and maps to the internal
    /// class instead.
    pub fn verify(&self, token: &str) -> Result<i64, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;

        data.claims.sub.parse::<i64>().map_err(|_| {
            tracing::error!(sub = %data.claims.sub, "token subject is not a valid user id");
            ApiError::Internal
        })
    }
}

//! Token service for session token issuance and validation
//!
//! Tokens are compact JWTs signed with HS256 under a secret injected at
//! startup. They are self-contained: there is no server-side session or
//! revocation list, so a token stays valid until `exp` passes. Rotating the
//! secret (a redeploy) is the only way to invalidate every outstanding token.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Upper bound on the configurable lifetime (ten years)
const MAX_TOKEN_TTL: u64 = 10 * 365 * 24 * 3600;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours)
    pub token_ttl: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared signing secret (required, non-empty)
    /// - `JWT_TTL_SECONDS`: Token lifetime in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let token_ttl = std::env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Ok(JwtConfig { secret, token_ttl })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID, as a decimal string
    pub sub: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Token service errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, expired or malformed; which check
    /// failed is only logged at debug level.
    #[error("invalid token")]
    Invalid,

    /// The token could not be signed
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Token service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl TokenService {
    /// Initialize a new token service from the injected configuration
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_ttl = Duration::seconds(config.token_ttl.min(MAX_TOKEN_TTL) as i64);

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            token_ttl,
        }
    }

    /// Issue a token for `subject`, valid from now for the configured lifetime
    pub fn issue(&self, subject: i64) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(&self, subject: i64, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = issued_at + self.token_ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;

        debug!(user_id = subject, exp = claims.exp, "Token issued");
        Ok(token)
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "Token rejected");
                TokenError::Invalid
            })?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::Invalid)
    }

    /// Token lifetime in seconds
    pub fn token_ttl(&self) -> i64 {
        self.token_ttl.num_seconds()
    }
}

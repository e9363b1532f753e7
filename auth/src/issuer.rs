use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::ClaimSet;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::JwtOptions;
use crate::jwt::TokenClaims;

/// Issues and verifies time-bounded bearer tokens for a claims set.
///
/// Binds a [`JwtHandler`] to the configured issuer, audience and lifetime. Issuance is
/// stateless: nothing is recorded server-side and every call produces a fresh token.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from startup options.
    ///
    /// # Errors
    /// * `WeakKey` - The secret key is shorter than 32 bytes
    /// * `InvalidLifetime` - `duration_in_days` is zero, negative or out of range
    pub fn new(options: &JwtOptions) -> Result<Self, JwtError> {
        let lifetime = Some(options.duration_in_days)
            .filter(|days| *days > 0)
            .and_then(Duration::try_days)
            .ok_or(JwtError::InvalidLifetime(options.duration_in_days))?;

        Ok(Self {
            jwt_handler: JwtHandler::new(options.secret_key.as_bytes())?,
            issuer: options.issuer.clone(),
            audience: options.audience.clone(),
            lifetime,
        })
    }

    /// Sign a claims set into a token that expires `duration_in_days` from now.
    pub fn issue(&self, claims: &ClaimSet) -> Result<String, JwtError> {
        self.issue_at(claims, Utc::now())
    }

    /// Sign a claims set as if issued at `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or the expiry is past the representable range
    pub fn issue_at(&self, claims: &ClaimSet, now: DateTime<Utc>) -> Result<String, JwtError> {
        let expires_at = now.checked_add_signed(self.lifetime).ok_or_else(|| {
            JwtError::EncodingFailed("token expiry is out of range".to_string())
        })?;

        let payload = TokenClaims {
            name: claims.name().to_string(),
            email: claims.email().to_string(),
            roles: claims.roles().to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        self.jwt_handler.encode(&payload)
    }

    /// Verify a token against the current time and return its claims set.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    ///
    /// Checks run in order: signature, expiry (inclusive of the expiry instant), issuer,
    /// audience.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `InvalidSignature` - Signature does not match
    /// * `Expired` - `now` is at or past the expiry
    /// * `InvalidIssuer` - Issuer differs from the configured one
    /// * `InvalidAudience` - Audience differs from the configured one
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, JwtError> {
        let payload: TokenClaims = self.jwt_handler.decode(token)?;

        if payload.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }
        if payload.iss != self.issuer {
            return Err(JwtError::InvalidIssuer);
        }
        if payload.aud != self.audience {
            return Err(JwtError::InvalidAudience);
        }

        payload.claim_set()
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

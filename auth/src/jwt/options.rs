use std::fmt;

use serde::Deserialize;

/// Token signing settings, loaded once at startup and read-only afterwards.
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct JwtOptions {
    /// Shared HMAC secret. Its UTF-8 bytes are the key material.
    pub secret_key: String,
    pub issuer: String,
    pub audience: String,
    pub duration_in_days: i64,
}

impl fmt::Debug for JwtOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtOptions")
            .field("secret_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("duration_in_days", &self.duration_in_days)
            .finish()
    }
}

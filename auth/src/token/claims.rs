use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload for an authenticated subject.
///
/// Self-contained: validity is decided purely by signature and expiry,
/// never by server-side state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the authenticated username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring a fixed duration from now.
    ///
    /// # Arguments
    /// * `subject` - Authenticated username
    /// * `lifetime` - Duration until expiry
    pub fn new(subject: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Whether the token is expired at the given instant.
    ///
    /// A token is invalid at or past its embedded expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed bearer tokens.
///
/// Tokens are JWTs signed with HS256 (HMAC with SHA-256) using a shared
/// secret. The secret and token lifetime are process-wide configuration:
/// loaded once at startup, passed into this constructor, never rotated
/// mid-process. There is no revocation mechanism; a token stays valid for
/// its full lifetime.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Signing key; should be at least 256 bits (32 bytes) for HS256
    /// * `lifetime_minutes` - Minutes from issuance to expiry
    pub fn new(secret: &[u8], lifetime_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    /// Issue a signed token for the given subject.
    ///
    /// The token embeds the subject and an absolute expiry set to the
    /// configured lifetime from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::new(subject, self.lifetime);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Verification is stateless: signature check plus expiry comparison,
    /// with zero leeway so a token is rejected at its embedded expiry
    /// instant.
    ///
    /// # Errors
    /// * `Expired` - Current time is at or past the embedded expiry
    /// * `Invalid` - Signature mismatch or structurally malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new(SECRET, 30);

        let token = service.issue("alice").expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = service.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_verify_garbage_token() {
        let service = TokenService::new(SECRET, 30);

        let result = service.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = TokenService::new(SECRET, 30);
        let verifier = TokenService::new(b"a_completely_different_32B_secret!", 30);

        let token = issuer.issue("alice").expect("Failed to issue token");

        let result = verifier.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_tampered_token() {
        let service = TokenService::new(SECRET, 30);

        let mut token = service.issue("alice").expect("Failed to issue token");
        // Flip a character in the signature segment
        let flipped = if token.ends_with('A') { 'B' } else { 'A' };
        token.pop();
        token.push(flipped);

        let result = service.verify(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_expired_token() {
        // Negative lifetime puts the expiry in the past at issuance
        let service = TokenService::new(SECRET, -5);

        let token = service.issue("alice").expect("Failed to issue token");

        let result = service.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }
}

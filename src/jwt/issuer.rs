use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::ACCESS_CLAIM;
use super::claims::ClaimSet;
use super::claims::EXPIRY_CLAIM;
use super::claims::IDENTITY_CLAIM;
use super::errors::IssueError;

/// Session token issuer.
///
/// Stamps the reserved claims into a caller's claim set and signs the
/// result with HMAC-SHA256. Every issued token carries `access = true` and
/// an integer `exp`; reserved claims overwrite whatever the caller supplied
/// under those names, so no caller can mint a token without them.
///
/// # Security Notes
/// The signing secret is injected at construction and shared with the
/// validator. Tokens are signed, not encrypted: anyone can read the
/// payload, so claims must never contain secrets.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    session_duration: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the process signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret shared with the validator
    /// * `session_duration` - How long issued sessions live
    ///
    /// # Panics
    /// Panics if `secret` is empty. A missing secret is a fatal
    /// configuration error and must stop the process at startup, not
    /// surface per request.
    pub fn new(secret: &[u8], session_duration: Duration) -> Self {
        assert!(!secret.is_empty(), "signing secret must not be empty");

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            session_duration,
        }
    }

    /// Issue a token expiring one session duration from now.
    ///
    /// # Arguments
    /// * `claims` - Caller claims to carry; reserved names are overwritten
    ///
    /// # Returns
    /// Signed compact token (`header.payload.signature`)
    ///
    /// # Errors
    /// * `EncodingFailed` - Claim serialization or signing failed
    pub fn issue(&self, claims: ClaimSet) -> Result<String, IssueError> {
        self.issue_at(claims, Utc::now() + self.session_duration)
    }

    /// Issue a token with an explicit absolute expiry.
    pub fn issue_expiring_at(
        &self,
        claims: ClaimSet,
        expires_at: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        self.issue_at(claims, expires_at)
    }

    fn issue_at(
        &self,
        mut claims: ClaimSet,
        expires_at: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        if !claims.contains(IDENTITY_CLAIM) {
            // Legal for service-to-service tokens, but worth an operator's
            // attention when it shows up in a login flow.
            tracing::warn!(claim = IDENTITY_CLAIM, "issuing token without identity claim");
        }

        claims.insert(ACCESS_CLAIM, true);
        claims.insert(EXPIRY_CLAIM, expires_at.timestamp());

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| IssueError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    use super::*;

    const SECRET: &[u8] = b"secret_key_at_least_32_bytes_long!";

    fn decode_payload(token: &str) -> serde_json::Value {
        let payload = token.split('.').nth(1).expect("Token has no payload segment");
        let bytes = URL_SAFE_NO_PAD.decode(payload).expect("Payload is not base64url");
        serde_json::from_slice(&bytes).expect("Payload is not JSON")
    }

    #[test]
    fn test_issue_produces_three_segments() {
        let issuer = TokenIssuer::new(SECRET, Duration::days(2));

        let token = issuer.issue(ClaimSet::new()).expect("Failed to issue token");

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issue_stamps_reserved_claims() {
        let issuer = TokenIssuer::new(SECRET, Duration::days(2));
        let before = Utc::now().timestamp();

        let token = issuer
            .issue(ClaimSet::new().with(IDENTITY_CLAIM, "user123"))
            .expect("Failed to issue token");
        let payload = decode_payload(&token);

        assert_eq!(payload["access"], serde_json::json!(true));
        assert_eq!(payload["id"], serde_json::json!("user123"));

        let exp = payload["exp"].as_i64().expect("exp is not an integer");
        let expected = before + 2 * 24 * 60 * 60;
        assert!((exp - expected).abs() <= 2, "exp {} too far from {}", exp, expected);
    }

    #[test]
    fn test_issue_overwrites_reserved_claims() {
        let issuer = TokenIssuer::new(SECRET, Duration::days(2));

        // A caller must not be able to mint an access=false or post-dated
        // token by naming the reserved claims.
        let claims = ClaimSet::new()
            .with(ACCESS_CLAIM, false)
            .with(EXPIRY_CLAIM, 5i64);
        let token = issuer.issue(claims).expect("Failed to issue token");
        let payload = decode_payload(&token);

        assert_eq!(payload["access"], serde_json::json!(true));
        assert!(payload["exp"].as_i64().expect("exp is not an integer") > Utc::now().timestamp());
    }

    #[test]
    fn test_issue_expiring_at_uses_given_expiry() {
        let issuer = TokenIssuer::new(SECRET, Duration::days(2));
        let expires_at = Utc::now() + Duration::minutes(5);

        let token = issuer
            .issue_expiring_at(ClaimSet::new(), expires_at)
            .expect("Failed to issue token");
        let payload = decode_payload(&token);

        assert_eq!(payload["exp"].as_i64(), Some(expires_at.timestamp()));
    }

    #[test]
    fn test_issue_preserves_caller_claims() {
        let issuer = TokenIssuer::new(SECRET, Duration::days(2));

        let claims = ClaimSet::new()
            .with(IDENTITY_CLAIM, "user123")
            .with("role", "admin")
            .with("version", 7i64);
        let token = issuer.issue(claims).expect("Failed to issue token");
        let payload = decode_payload(&token);

        assert_eq!(payload["id"], serde_json::json!("user123"));
        assert_eq!(payload["role"], serde_json::json!("admin"));
        assert_eq!(payload["version"], serde_json::json!(7));
    }

    #[test]
    #[should_panic(expected = "signing secret must not be empty")]
    fn test_empty_secret_panics() {
        TokenIssuer::new(b"", Duration::days(2));
    }
}

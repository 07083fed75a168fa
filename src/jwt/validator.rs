use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::ACCESS_CLAIM;
use super::claims::ClaimSet;

/// Outcome of validating one token. Exactly one outcome per token, decided
/// in a fixed order: structure, then signature, then expiry, then required
/// claims.
///
/// Returned by value rather than as an error so every caller has to handle
/// every case. None of these outcomes are transient; retrying the same
/// token yields the same outcome (modulo passing its expiry).
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Signature verified, token unexpired, every required claim matched.
    /// Carries the full decoded claim set, including claims the caller did
    /// not ask about.
    Valid(ClaimSet),

    /// Authentic token whose expiry has passed, is missing, or is not an
    /// integer.
    Expired,

    /// The transmitted signature does not match the one recomputed over
    /// the transmitted header and payload.
    InvalidSignature,

    /// Not a three-segment compact token, or a segment that could not be
    /// decoded.
    Malformed,

    /// Authentic, unexpired token lacking a required claim, or carrying it
    /// with a different value or type.
    MissingOrInvalidClaim,
}

/// Session token validator.
///
/// Verifies the HMAC-SHA256 signature before interpreting any payload
/// content: expiry and claim checks only ever run over authenticated
/// bytes. The claim check always includes `access = true` on top of
/// whatever the caller requires, so tokens minted outside the issuer's
/// reserved-claim stamping never validate.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator from the process signing secret.
    ///
    /// # Panics
    /// Panics if `secret` is empty, same as the issuer: fail at startup,
    /// never per request.
    pub fn new(secret: &[u8]) -> Self {
        assert!(!secret.is_empty(), "signing secret must not be empty");

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry and required claims are classified here, not inside the
        // decoder, so each failure maps onto a distinct outcome. The
        // decoder's own expiry check also carries leeway, which would let
        // just-expired tokens through.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate a compact token against the claims a caller requires.
    ///
    /// `required` lists claims that must be present in the token with
    /// exactly the given values; `access = true` is added to it unless the
    /// caller already named `access`. The required set itself is never
    /// modified.
    ///
    /// # Arguments
    /// * `token` - Compact token text, without any scheme prefix
    /// * `required` - Claims the token must carry, matched on type and value
    ///
    /// # Returns
    /// One [`ValidationOutcome`]; `Valid` carries the full decoded claim set
    pub fn validate(&self, token: &str, required: &ClaimSet) -> ValidationOutcome {
        if !has_compact_shape(token) {
            tracing::warn!("rejected malformed token");
            return ValidationOutcome::Malformed;
        }

        let claims = match decode::<ClaimSet>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => return classify_decode_error(&e),
        };

        // Strict comparison: a token expiring this second is already
        // expired, and a token without a usable integer expiry never
        // becomes valid.
        let now = Utc::now().timestamp();
        if !claims.expiry().is_some_and(|exp| exp > now) {
            tracing::warn!("rejected expired token");
            return ValidationOutcome::Expired;
        }

        let mut to_check = required.clone();
        if !to_check.contains(ACCESS_CLAIM) {
            to_check.insert(ACCESS_CLAIM, true);
        }
        for (name, expected) in to_check.iter() {
            if claims.get(name) != Some(expected) {
                tracing::warn!(claim = %name, "rejected token with missing or invalid claim");
                return ValidationOutcome::MissingOrInvalidClaim;
            }
        }

        tracing::trace!("validated token");
        ValidationOutcome::Valid(claims)
    }
}

/// Structural check run before signature verification: exactly three
/// dot-separated segments, with base64url-decodable header and payload.
///
/// Decoded bytes are discarded; nothing from the payload is interpreted
/// until the signature has verified. The signature segment is compared in
/// its encoded form during verification and is deliberately not decoded
/// here, so a corrupted signature stays a signature failure rather than
/// becoming a structural one.
fn has_compact_shape(token: &str) -> bool {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };
    if segments.next().is_some() {
        return false;
    }

    URL_SAFE_NO_PAD.decode(header).is_ok() && URL_SAFE_NO_PAD.decode(payload).is_ok()
}

fn classify_decode_error(error: &jsonwebtoken::errors::Error) -> ValidationOutcome {
    match error.kind() {
        ErrorKind::ExpiredSignature => {
            tracing::warn!("rejected expired token");
            ValidationOutcome::Expired
        }
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            tracing::warn!("rejected token signature");
            ValidationOutcome::InvalidSignature
        }
        _ => {
            tracing::warn!("rejected undecodable token");
            ValidationOutcome::Malformed
        }
    }
}

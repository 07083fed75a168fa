use std::fmt;

use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::jwt::ClaimSet;
use crate::jwt::IDENTITY_CLAIM;
use crate::jwt::TokenValidator;
use crate::jwt::ValidationOutcome;

/// Scheme prefix expected on the Authorization header, including the
/// trailing space. Matched exactly; HTTP auth schemes are case-insensitive
/// on the wire, but this gate accepts the canonical spelling only.
const BEARER_PREFIX: &str = "Bearer ";

/// Caller-visible message for expired sessions. Expiry is safe to disclose
/// and tells a legitimate client to log in again.
const EXPIRED_MESSAGE: &str = "Token expired.";

/// Caller-visible message for every other denial. One message for missing,
/// malformed, forged, and claim-poor tokens, so responses don't tell a
/// probing client which part of its forgery failed.
const GENERIC_MESSAGE: &str = "Invalid credentials.";

/// Why a request was denied. Operator-side detail: log it, never send it
/// back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No Authorization header, more than one, a non-Bearer scheme, or an
    /// empty token after the scheme.
    MissingCredentials,
    /// Token failed the structural checks.
    Malformed,
    /// Token signature did not verify.
    InvalidSignature,
    /// Token was authentic but past its expiry.
    Expired,
    /// Token was authentic and alive but lacked a required claim.
    MissingOrInvalidClaim,
}

/// A denied authorization: the caller-safe message plus the specific
/// reason for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub reason: DenialReason,
    pub message: &'static str,
}

impl Denial {
    fn new(reason: DenialReason) -> Self {
        let message = match reason {
            DenialReason::Expired => EXPIRED_MESSAGE,
            _ => GENERIC_MESSAGE,
        };

        Self { reason, message }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Authorization gate for protected endpoints.
///
/// Extracts the bearer token from request headers, validates it, and
/// collapses the outcome into either the decoded claims or a [`Denial`]
/// whose message is safe to return verbatim in an HTTP response body.
pub struct AuthorizationGate {
    validator: TokenValidator,
}

impl AuthorizationGate {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    /// Authorize a request from its headers.
    ///
    /// # Arguments
    /// * `headers` - Request headers; exactly one `Authorization: Bearer`
    ///   value is expected
    /// * `required` - Claims the session token must carry
    ///
    /// # Returns
    /// Full decoded claim set of the authorized session
    ///
    /// # Errors
    /// [`Denial`] for any missing, malformed, forged, expired, or
    /// claim-poor credential. Header problems are a denial, never a panic.
    pub fn authorize(&self, headers: &HeaderMap, required: &ClaimSet) -> Result<ClaimSet, Denial> {
        let Some(token) = bearer_token(headers) else {
            tracing::warn!("request without usable bearer credentials");
            return Err(Denial::new(DenialReason::MissingCredentials));
        };

        match self.validator.validate(token, required) {
            ValidationOutcome::Valid(claims) => {
                tracing::trace!("authorized request");
                Ok(claims)
            }
            ValidationOutcome::Expired => Err(Denial::new(DenialReason::Expired)),
            ValidationOutcome::InvalidSignature => Err(Denial::new(DenialReason::InvalidSignature)),
            ValidationOutcome::Malformed => Err(Denial::new(DenialReason::Malformed)),
            ValidationOutcome::MissingOrInvalidClaim => {
                Err(Denial::new(DenialReason::MissingOrInvalidClaim))
            }
        }
    }

    /// Authorize a request and extract the caller's identity claim.
    ///
    /// For endpoints that act on the authenticated user. A token that
    /// authorizes but carries no non-empty string identity is denied here
    /// rather than handed to the endpoint with its subject missing.
    ///
    /// # Returns
    /// The identity claim value plus the full decoded claim set
    pub fn authorize_identity(
        &self,
        headers: &HeaderMap,
        required: &ClaimSet,
    ) -> Result<(String, ClaimSet), Denial> {
        let claims = self.authorize(headers, required)?;

        let identity = match claims.identity() {
            Some(identity) if !identity.is_empty() => identity.to_string(),
            _ => {
                tracing::warn!(claim = IDENTITY_CLAIM, "authorized token carries no identity");
                return Err(Denial::new(DenialReason::MissingOrInvalidClaim));
            }
        };

        Ok((identity, claims))
    }
}

/// Extract the bearer token from request headers.
///
/// Requires exactly one Authorization value with the `Bearer ` scheme and a
/// non-empty remainder. Duplicate headers are rejected outright instead of
/// picking one, since two values are as good as none for identifying a
/// caller.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let mut values = headers.get_all(AUTHORIZATION).iter();
    let value = values.next()?;
    if values.next().is_some() {
        return None;
    }

    let token = value.to_str().ok()?.strip_prefix(BEARER_PREFIX)?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

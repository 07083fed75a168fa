//! Credential and session token library
//!
//! Provides the security core a user-facing backend builds on:
//! - Password hashing (PBKDF2-HMAC-SHA512 with per-credential salt)
//! - Session token issuance and validation (HMAC-SHA256) with a fixed
//!   claim contract: every token carries `access = true` and an integer
//!   `exp`
//! - Request authorization gating on required claims
//!
//! Storage, routing, and transport stay with the caller. Everything here
//! takes and returns plain values and performs no I/O, so the same core
//! serves an HTTP handler, a queue consumer, or a test without adaptation.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use authkit::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let credential = hasher.derive("my_password");
//! let is_valid = hasher.verify("my_password", &credential.salt, &credential.hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use authkit::{ClaimSet, TokenIssuer, TokenValidator, ValidationOutcome};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::days(2));
//! let token = issuer.issue(ClaimSet::new().with("id", "user123")).unwrap();
//!
//! let validator = TokenValidator::new(secret);
//! let outcome = validator.validate(&token, &ClaimSet::new().with("id", "user123"));
//! assert!(matches!(outcome, ValidationOutcome::Valid(_)));
//! ```
//!
//! ## Gating a Request
//! ```
//! use authkit::{AuthorizationGate, ClaimSet, TokenIssuer, TokenValidator};
//! use chrono::Duration;
//! use http::{header, HeaderMap, HeaderValue};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::days(2));
//! let token = issuer.issue(ClaimSet::new().with("id", "user123")).unwrap();
//!
//! let mut headers = HeaderMap::new();
//! let value = HeaderValue::from_str(&format!("Bearer {token}")).unwrap();
//! headers.insert(header::AUTHORIZATION, value);
//!
//! let gate = AuthorizationGate::new(TokenValidator::new(secret));
//! let (identity, _claims) = gate.authorize_identity(&headers, &ClaimSet::new()).unwrap();
//! assert_eq!(identity, "user123");
//! ```

pub mod authenticator;
pub mod config;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use gate::AuthorizationGate;
pub use gate::Denial;
pub use gate::DenialReason;
pub use jwt::ClaimSet;
pub use jwt::ClaimValue;
pub use jwt::IssueError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use jwt::ValidationOutcome;
pub use password::Credential;
pub use password::PasswordError;
pub use password::PasswordHasher;

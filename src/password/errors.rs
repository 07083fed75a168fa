use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Stored salt is not usable: not valid base64, or the wrong decoded
    /// size. A credential carrying such a salt is rejected; it is never
    /// silently replaced with a fresh salt.
    #[error("Malformed salt: {0}")]
    MalformedSalt(String),
}

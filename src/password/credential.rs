use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A stored password credential: the derived hash and the salt it was
/// derived with, both as standard base64 text.
///
/// Callers persist and retrieve this pair; this crate only produces and
/// consumes it. Both fields round-trip through serialization verbatim, so a
/// credential read back from storage verifies exactly as written.
///
/// # Security Notes
/// The `Debug` representation redacts both fields so a credential cannot
/// leak through logs or error output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// 512-bit derived hash, base64-encoded.
    pub hash: String,
    /// 128-bit salt, base64-encoded.
    pub salt: String,
}

impl Credential {
    /// Create a credential from already-encoded hash and salt text.
    pub fn new(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

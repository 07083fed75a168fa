use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

use super::credential::Credential;
use super::errors::PasswordError;

/// Salt size in bytes (128 bits). Stored salts must decode to exactly this
/// many bytes.
pub const SALT_LEN: usize = 16;

/// Derived hash size in bytes (512 bits).
pub const HASH_LEN: usize = 64;

/// PBKDF2 iteration count. This is a versioned security parameter: changing
/// it invalidates every stored hash, so it must only change together with a
/// credential migration.
pub const PBKDF2_ROUNDS: u32 = 12_000;

/// Password hashing implementation.
///
/// Derives 512-bit hashes with PBKDF2-HMAC-SHA512 over a random 128-bit
/// salt. Hash and salt travel as standard base64 text; the raw bytes never
/// leave this module.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh random salt from the operating system CSPRNG.
    ///
    /// # Returns
    /// 128-bit salt, base64-encoded
    pub fn generate_salt(&self) -> String {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        STANDARD.encode(salt)
    }

    /// Derive a full credential for a new password.
    ///
    /// Generates a fresh salt and hashes the password with it, so two calls
    /// with the same password yield different credentials.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Credential holding base64 hash and salt, ready to persist
    pub fn derive(&self, password: &str) -> Credential {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        Credential {
            hash: STANDARD.encode(derive_hash(password, &salt)),
            salt: STANDARD.encode(salt),
        }
    }

    /// Hash a password with an existing salt.
    ///
    /// Deterministic: the same password and salt always produce the same
    /// hash, which is what makes stored-hash comparison possible.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    /// * `salt` - Base64 salt taken from a stored credential
    ///
    /// # Returns
    /// 512-bit hash, base64-encoded
    ///
    /// # Errors
    /// * `MalformedSalt` - Salt is not base64 or does not decode to exactly
    ///   16 bytes
    pub fn hash(&self, password: &str, salt: &str) -> Result<String, PasswordError> {
        let salt_bytes = decode_salt(salt)?;
        Ok(STANDARD.encode(derive_hash(password, &salt_bytes)))
    }

    /// Verify a password against a stored credential's salt and hash.
    ///
    /// Recomputes the hash with the stored salt and compares it to the
    /// stored hash in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `salt` - Base64 salt from the stored credential
    /// * `hash` - Base64 hash from the stored credential
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedSalt` - Stored salt is unusable; the credential is
    ///   rejected rather than re-derived
    pub fn verify(&self, password: &str, salt: &str, hash: &str) -> Result<bool, PasswordError> {
        let computed = self.hash(password, salt)?;
        Ok(constant_time_compare(computed.as_bytes(), hash.as_bytes()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_salt(salt: &str) -> Result<[u8; SALT_LEN], PasswordError> {
    let bytes = STANDARD
        .decode(salt)
        .map_err(|e| PasswordError::MalformedSalt(format!("not valid base64: {}", e)))?;

    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        PasswordError::MalformedSalt(format!("decoded to {} bytes, expected {}", len, SALT_LEN))
    })
}

fn derive_hash(password: &str, salt: &[u8]) -> [u8; HASH_LEN] {
    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut hash);
    hash
}

/// Constant-time comparison to prevent timing attacks.
///
/// Both sides are base64 encodings of fixed-size hashes, so the lengths
/// compared here are not secret.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

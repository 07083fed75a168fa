use chrono::Duration;

use crate::jwt::ClaimSet;
use crate::jwt::IssueError;
use crate::jwt::TokenIssuer;
use crate::password::Credential;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session
/// token issuance.
///
/// Covers the register and login flows; storage of the credential between
/// the two is the caller's concern.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Issue(#[from] IssueError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Signing secret for session tokens
    /// * `session_duration` - How long issued sessions live
    ///
    /// # Panics
    /// Panics if `secret` is empty; see [`TokenIssuer::new`].
    pub fn new(secret: &[u8], session_duration: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret, session_duration),
        }
    }

    /// Derive a credential for a newly registered password.
    ///
    /// # Returns
    /// Credential with a fresh salt, ready to persist
    pub fn register(&self, password: &str) -> Credential {
        self.password_hasher.derive(password)
    }

    /// Verify a password against a stored credential and mint a session
    /// token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password presented at login
    /// * `credential` - Stored hash and salt for the account
    /// * `claims` - Claims to carry in the session token
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored credential is malformed; it is rejected, never
    ///   re-derived
    /// * `Issue` - Token signing failed
    pub fn login(
        &self,
        password: &str,
        credential: &Credential,
        claims: ClaimSet,
    ) -> Result<String, AuthenticationError> {
        // Verify password
        let is_valid = self
            .password_hasher
            .verify(password, &credential.salt, &credential.hash)?;

        if !is_valid {
            tracing::warn!("rejected login with non-matching password");
            return Err(AuthenticationError::InvalidCredentials);
        }

        // Mint session token
        Ok(self.token_issuer.issue(claims)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::jwt::TokenValidator;
    use crate::jwt::ValidationOutcome;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_register_and_login() {
        let authenticator = Authenticator::new(SECRET, Duration::days(2));

        let password = "my_password";
        let credential = authenticator.register(password);

        let token = authenticator
            .login(password, &credential, ClaimSet::new().with("id", "user123"))
            .expect("Login failed");

        // The minted session validates and carries the identity.
        let outcome = TokenValidator::new(SECRET).validate(&token, &ClaimSet::new());
        let ValidationOutcome::Valid(claims) = outcome else {
            panic!("expected a valid session token");
        };
        assert_eq!(claims.identity(), Some("user123"));
    }

    #[test]
    fn test_login_wrong_password() {
        let authenticator = Authenticator::new(SECRET, Duration::days(2));

        let credential = authenticator.register("my_password");
        let result = authenticator.login("wrong_password", &credential, ClaimSet::new());

        assert!(matches!(result, Err(AuthenticationError::InvalidCredentials)));
    }

    #[test]
    fn test_login_with_corrupted_credential() {
        let authenticator = Authenticator::new(SECRET, Duration::days(2));

        let mut credential = authenticator.register("my_password");
        credential.salt = "AAAAAAAAAAAAAA==".to_string(); // 10 bytes

        let result = authenticator.login("my_password", &credential, ClaimSet::new());

        assert!(matches!(
            result,
            Err(AuthenticationError::Password(PasswordError::MalformedSalt(_)))
        ));
    }

    #[test]
    fn test_register_salts_are_unique() {
        let authenticator = Authenticator::new(SECRET, Duration::days(2));

        let first = authenticator.register("my_password");
        let second = authenticator.register("my_password");

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }
}

pub mod credential;
pub mod errors;
pub mod pbkdf2;

pub use credential::Credential;
pub use errors::PasswordError;
pub use pbkdf2::PasswordHasher;

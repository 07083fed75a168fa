pub mod claims;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::ACCESS_CLAIM;
pub use claims::ClaimSet;
pub use claims::ClaimValue;
pub use claims::EXPIRY_CLAIM;
pub use claims::IDENTITY_CLAIM;
pub use errors::IssueError;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
pub use validator::ValidationOutcome;

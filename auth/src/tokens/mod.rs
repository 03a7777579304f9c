pub mod errors;
pub mod issuer;
pub mod validator;

pub use errors::TokenError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetime;
pub use validator::TokenValidator;

//! Authentication and session-token library
//!
//! Provides the token subsystem used by the notes service:
//! - Credential verification (Argon2id)
//! - Signed access tokens (JWT, HS256) with optional expiry
//! - Token validation against expiry and per-subject revocation
//! - Revocation registry over a pluggable store
//!
//! Services own their user records and call into [`Authenticator`] for
//! everything that touches secrets or tokens.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Login, validate, logout
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, InMemoryRevocationStore};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     3600,
//!     Arc::new(InMemoryRevocationStore::new()),
//! )
//! .unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let session = auth.authenticate("password123", &hash, "user-1").unwrap();
//! assert_eq!(auth.validate_token(&session.access_token).await.unwrap(), "user-1");
//!
//! auth.revoke("user-1").await.unwrap();
//! assert!(auth.validate_token(&session.access_token).await.is_err());
//! # });
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod tokens;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::ConfigurationError;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use revocation::InMemoryRevocationStore;
pub use revocation::RevocationEntry;
pub use revocation::RevocationError;
pub use revocation::RevocationRegistry;
pub use revocation::RevocationStore;
pub use tokens::IssuedToken;
pub use tokens::TokenError;
pub use tokens::TokenLifetime;

//! Token and credential primitives for the identity service.
//!
//! - Claims sets (name, email, roles) and their JWT payload shape
//! - HS256 signing and verification with issuer, audience and expiry checks
//! - Password hashing (Argon2id) for identity stores
//!
//! # Examples
//!
//! ## Issuing and verifying a token
//! ```
//! use auth::{ClaimSet, JwtOptions, TokenIssuer};
//!
//! let options = JwtOptions {
//!     secret_key: "secret_key_at_least_32_bytes_long!".to_string(),
//!     issuer: "https://identity.local".to_string(),
//!     audience: "storefront".to_string(),
//!     duration_in_days: 7,
//! };
//! let issuer = TokenIssuer::new(&options).unwrap();
//!
//! let claims = ClaimSet::new("alice", "alice@example.com")
//!     .unwrap()
//!     .with_role("Customer");
//! let token = issuer.issue(&claims).unwrap();
//!
//! let verified = issuer.verify(&token).unwrap();
//! assert_eq!(verified.roles(), ["Customer"]);
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Pa$$w0rd").unwrap();
//! assert!(hasher.verify("Pa$$w0rd", &hash).unwrap());
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::TokenIssuer;
pub use jwt::ClaimSet;
pub use jwt::ClaimType;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::JwtOptions;
pub use jwt::TokenClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;

pub mod claims;
pub mod errors;
pub mod handler;
pub mod options;

pub use claims::ClaimSet;
pub use claims::ClaimType;
pub use claims::TokenClaims;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use options::JwtOptions;

use auth::ClaimSet;
use auth::JwtError;

use crate::domain::account::models::User;

/// Assemble the claims for a verified user: username, email, then roles in store order.
///
/// # Errors
/// * `MissingClaim` - The user has no username or email
pub fn build_claims(user: &User, roles: Vec<String>) -> Result<ClaimSet, JwtError> {
    Ok(ClaimSet::new(user.username.as_str(), user.email.as_str())?.with_roles(roles))
}

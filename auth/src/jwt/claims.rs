use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Kind of an identity claim carried in a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimType {
    Name,
    Email,
    Role,
}

impl ClaimType {
    /// Short JWT claim name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Name => "unique_name",
            ClaimType::Email => "email",
            ClaimType::Role => "role",
        }
    }
}

/// Identity assertions embedded in a token: one name, one email and zero or more roles.
///
/// Built fresh for every issuance and never persisted. Roles keep the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    name: String,
    email: String,
    roles: Vec<String>,
}

impl ClaimSet {
    /// Create a claims set for a user.
    ///
    /// # Errors
    /// * `MissingClaim` - Name or email is empty
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, JwtError> {
        let name = name.into();
        let email = email.into();

        if name.is_empty() {
            return Err(JwtError::MissingClaim(ClaimType::Name.as_str().to_string()));
        }
        if email.is_empty() {
            return Err(JwtError::MissingClaim(ClaimType::Email.as_str().to_string()));
        }

        Ok(Self {
            name,
            email,
            roles: Vec::new(),
        })
    }

    /// Append a role claim.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Append role claims in iteration order.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Iterate over every claim in insertion order: name, email, then roles.
    pub fn iter(&self) -> impl Iterator<Item = (ClaimType, &str)> + '_ {
        [
            (ClaimType::Name, self.name.as_str()),
            (ClaimType::Email, self.email.as_str()),
        ]
        .into_iter()
        .chain(self.roles.iter().map(|r| (ClaimType::Role, r.as_str())))
    }
}

/// Token payload as serialized into the JWT body.
///
/// Registered claims (`iss`, `aud`, `iat`, `exp`) sit next to the identity claims.
/// `role` is omitted with no roles, a plain string with one and an array with several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    #[serde(rename = "unique_name")]
    pub name: String,

    pub email: String,

    #[serde(
        rename = "role",
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "one_or_many"
    )]
    pub roles: Vec<String>,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Whether the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself counts as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Identity part of the payload.
    pub fn claim_set(&self) -> Result<ClaimSet, JwtError> {
        Ok(ClaimSet::new(self.name.clone(), self.email.clone())?.with_roles(self.roles.clone()))
    }
}

mod one_or_many {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(roles: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        match roles {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(role) => vec![role],
            OneOrMany::Many(roles) => roles,
        })
    }
}

use std::collections::HashSet;
use std::str::FromStr;

use crate::domain::account::models::User;

/// A single rule violation reported by an identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityError {
    pub code: String,
    pub description: String,
}

impl IdentityError {
    fn new(code: &str, description: String) -> Self {
        Self {
            code: code.to_string(),
            description,
        }
    }

    pub fn duplicate_user_name(username: &str) -> Self {
        Self::new(
            "DuplicateUserName",
            format!("Username '{}' is already taken.", username),
        )
    }

    pub fn duplicate_email(email: &str) -> Self {
        Self::new("DuplicateEmail", format!("Email '{}' is already taken.", email))
    }

    pub fn invalid_user_name(username: &str) -> Self {
        Self::new(
            "InvalidUserName",
            format!(
                "Username '{}' is invalid, can only contain letters or digits.",
                username
            ),
        )
    }

    pub fn invalid_email(email: &str) -> Self {
        Self::new("InvalidEmail", format!("Email '{}' is invalid.", email))
    }

    pub fn user_name_too_long(max: usize) -> Self {
        Self::new(
            "UserNameTooLong",
            format!("Username must be at most {} characters.", max),
        )
    }

    pub fn email_too_long(max: usize) -> Self {
        Self::new(
            "EmailTooLong",
            format!("Email must be at most {} characters.", max),
        )
    }

    pub fn display_name_too_long(max: usize) -> Self {
        Self::new(
            "DisplayNameTooLong",
            format!("Display name must be at most {} characters.", max),
        )
    }

    pub fn phone_number_too_long(max: usize) -> Self {
        Self::new(
            "PhoneNumberTooLong",
            format!("Phone number must be at most {} characters.", max),
        )
    }

    pub fn password_too_short(length: usize) -> Self {
        Self::new(
            "PasswordTooShort",
            format!("Passwords must be at least {} characters.", length),
        )
    }

    pub fn password_requires_non_alphanumeric() -> Self {
        Self::new(
            "PasswordRequiresNonAlphanumeric",
            "Passwords must have at least one non alphanumeric character.".to_string(),
        )
    }

    pub fn password_requires_digit() -> Self {
        Self::new(
            "PasswordRequiresDigit",
            "Passwords must have at least one digit ('0'-'9').".to_string(),
        )
    }

    pub fn password_requires_lower() -> Self {
        Self::new(
            "PasswordRequiresLower",
            "Passwords must have at least one lowercase ('a'-'z').".to_string(),
        )
    }

    pub fn password_requires_upper() -> Self {
        Self::new(
            "PasswordRequiresUpper",
            "Passwords must have at least one uppercase ('A'-'Z').".to_string(),
        )
    }

    pub fn password_requires_unique_chars(count: usize) -> Self {
        Self::new(
            "PasswordRequiresUniqueChars",
            format!("Passwords must use at least {} different characters.", count),
        )
    }
}

/// Outcome of an identity store write: success, or every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityResult {
    errors: Vec<IdentityError>,
}

impl IdentityResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failed(errors: Vec<IdentityError>) -> Self {
        Self { errors }
    }

    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[IdentityError] {
        &self.errors
    }

    /// Human-readable messages in the order they were reported.
    pub fn into_descriptions(self) -> Vec<String> {
        self.errors.into_iter().map(|e| e.description).collect()
    }
}

/// Password strength requirements checked on user creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub required_unique_chars: usize,
    pub require_non_alphanumeric: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            required_length: 6,
            required_unique_chars: 1,
            require_non_alphanumeric: true,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicy {
    /// Every rule the password breaks.
    pub fn validate(&self, password: &str) -> Vec<IdentityError> {
        let mut errors = Vec::new();

        if password.chars().count() < self.required_length {
            errors.push(IdentityError::password_too_short(self.required_length));
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(IdentityError::password_requires_non_alphanumeric());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push(IdentityError::password_requires_digit());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push(IdentityError::password_requires_lower());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push(IdentityError::password_requires_upper());
        }
        if self.required_unique_chars > 1
            && password.chars().collect::<HashSet<_>>().len() < self.required_unique_chars
        {
            errors.push(IdentityError::password_requires_unique_chars(
                self.required_unique_chars,
            ));
        }

        errors
    }
}

/// Which of a candidate user's unique keys are already held by someone else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uniqueness {
    pub user_name_taken: bool,
    pub email_taken: bool,
}

/// Upper bounds on stored user fields, in characters. Defaults match the `users` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub user_name: usize,
    pub email: usize,
    pub display_name: usize,
    pub phone_number: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            user_name: 256,
            email: 256,
            display_name: 256,
            phone_number: 64,
        }
    }
}

/// Rules an identity store applies before creating a user.
#[derive(Debug, Clone)]
pub struct IdentityPolicy {
    pub password: PasswordPolicy,
    pub allowed_user_name_characters: String,
    pub limits: FieldLimits,
}

impl Default for IdentityPolicy {
    fn default() -> Self {
        Self {
            password: PasswordPolicy::default(),
            allowed_user_name_characters:
                "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._@+".to_string(),
            limits: FieldLimits::default(),
        }
    }
}

impl IdentityPolicy {
    /// Check a new user and its password, collecting every violation.
    ///
    /// Username problems come first, then email, then the remaining profile fields, then
    /// password.
    pub fn validate_new_user(
        &self,
        user: &User,
        password: &str,
        uniqueness: Uniqueness,
    ) -> IdentityResult {
        let mut errors = self.validate_user(user, uniqueness);
        errors.extend(self.password.validate(password));
        IdentityResult::failed(errors)
    }

    fn validate_user(&self, user: &User, uniqueness: Uniqueness) -> Vec<IdentityError> {
        let mut errors = Vec::new();

        let limits = self.limits;

        let user_name_valid = !user.username.is_empty()
            && user
                .username
                .chars()
                .all(|c| self.allowed_user_name_characters.contains(c));
        if user.username.chars().count() > limits.user_name {
            errors.push(IdentityError::user_name_too_long(limits.user_name));
        } else if !user_name_valid {
            errors.push(IdentityError::invalid_user_name(&user.username));
        } else if uniqueness.user_name_taken {
            errors.push(IdentityError::duplicate_user_name(&user.username));
        }

        if user.email.chars().count() > limits.email {
            errors.push(IdentityError::email_too_long(limits.email));
        } else if email_address::EmailAddress::from_str(&user.email).is_err() {
            errors.push(IdentityError::invalid_email(&user.email));
        } else if uniqueness.email_taken {
            errors.push(IdentityError::duplicate_email(&user.email));
        }

        if user.display_name.chars().count() > limits.display_name {
            errors.push(IdentityError::display_name_too_long(limits.display_name));
        }
        if user
            .phone_number
            .as_ref()
            .is_some_and(|p| p.chars().count() > limits.phone_number)
        {
            errors.push(IdentityError::phone_number_too_long(limits.phone_number));
        }

        errors
    }
}

//! Authentication primitives: login credentials, signup requests and password
//! hashing.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use zeroize::Zeroizing;

use super::form::{FormErrors, REQUIRED_MESSAGE};
use super::user::Username;

/// Message attached to `password2` when the passwords differ.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn’t match.";

/// Message attached to `username` when the name is already registered.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

/// Non-field message shown when login fails.
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl LoginValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use noticeboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" author ", "password").unwrap();
/// assert_eq!(creds.username(), "author");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Validate the signup form fields.
    ///
    /// Passwords are compared verbatim; whitespace is significant.
    pub fn validate(username: &str, password1: &str, password2: &str) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::default();

        let username = if username.trim().is_empty() {
            errors.add("username", REQUIRED_MESSAGE);
            None
        } else {
            Username::new(username)
                .map_err(|err| errors.add("username", err.to_string()))
                .ok()
        };
        if password1.is_empty() {
            errors.add("password1", REQUIRED_MESSAGE);
        }
        if password2.is_empty() {
            errors.add("password2", REQUIRED_MESSAGE);
        } else if !password1.is_empty() && password1 != password2 {
            errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
        }

        match username {
            Some(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password1.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Failure to produce a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to hash password: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Argon2 password hash in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `password` with a fresh random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Check `password` against the stored hash.
    ///
    /// Malformed stored hashes never verify.
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// PHC string for storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn signup_accepts_matching_passwords() {
        let request = SignupRequest::validate("reader", "s3cret pw", "s3cret pw").expect("valid");
        assert_eq!(request.username().as_ref(), "reader");
        assert_eq!(request.password(), "s3cret pw");
    }

    #[rstest]
    fn signup_reports_every_field() {
        let errors = SignupRequest::validate("", "", "").expect_err("invalid");
        assert_eq!(errors.field("username"), [REQUIRED_MESSAGE]);
        assert_eq!(errors.field("password1"), [REQUIRED_MESSAGE]);
        assert_eq!(errors.field("password2"), [REQUIRED_MESSAGE]);
    }

    #[rstest]
    fn signup_rejects_mismatched_passwords() {
        let errors = SignupRequest::validate("reader", "one", "two").expect_err("mismatch");
        assert_eq!(errors.field("password2"), [PASSWORD_MISMATCH_MESSAGE]);
        assert!(errors.field("username").is_empty());
    }

    #[rstest]
    fn signup_rejects_invalid_usernames() {
        let errors = SignupRequest::validate("bad name", "pw", "pw").expect_err("invalid");
        assert_eq!(errors.field("username").len(), 1);
    }

    #[rstest]
    fn digests_verify_only_the_original_password() {
        let digest = PasswordDigest::hash("password").expect("hash");
        assert!(digest.as_str().starts_with("$argon2"));
        assert!(digest.verify("password"));
        assert!(!digest.verify("Password"));
    }

    #[rstest]
    fn malformed_digests_never_verify() {
        assert!(!PasswordDigest::from_stored("not-a-phc-string").verify("anything"));
    }
}

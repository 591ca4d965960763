//! Driving port for account use-cases: registration, login and session
//! resolution.
//!
//! Inbound adapters call it without knowing the backing infrastructure, so
//! HTTP handler tests can substitute an in-memory implementation.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignupRequest, User, UserId};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new user.
    ///
    /// A taken username is reported as a validation error on `username`.
    async fn sign_up(&self, request: SignupRequest) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve the user stored in a session, if it still exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}

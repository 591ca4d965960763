//! Account domain service.
//!
//! Implements the [`AccountCommand`] driving port on top of a
//! [`UserRepository`], hashing passwords with Argon2 before they are stored.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::auth::{DUPLICATE_USERNAME_MESSAGE, INVALID_LOGIN_MESSAGE};
use crate::domain::ports::{AccountCommand, UserPersistenceError, UserRepository};
use crate::domain::{
    Error, FormErrors, LoginCredentials, PasswordDigest, SignupRequest, User, UserId,
};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            let mut errors = FormErrors::default();
            errors.add("username", DUPLICATE_USERNAME_MESSAGE);
            Error::validation(errors)
        }
    }
}

fn invalid_login() -> Error {
    let mut errors = FormErrors::default();
    errors.add_non_field(INVALID_LOGIN_MESSAGE);
    Error::validation(errors)
}

/// Account service implementing the account driving port.
#[derive(Clone)]
pub struct AccountService<R> {
    user_repo: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new account service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> AccountCommand for AccountService<R>
where
    R: UserRepository,
{
    async fn sign_up(&self, request: SignupRequest) -> Result<User, Error> {
        let digest = PasswordDigest::hash(request.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = User::new(UserId::random(), request.username().clone());

        self.user_repo
            .insert(&user, &digest)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .user_repo
            .find_credentials(credentials.username())
            .await
            .map_err(map_repository_error)?;

        match stored {
            Some(stored) if stored.password.verify(credentials.password()) => Ok(stored.user),
            _ => {
                debug!(username = credentials.username(), "login rejected");
                Err(invalid_login())
            }
        }
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockUserRepository, StoredCredentials};
    use rstest::rstest;

    fn service(repo: MockUserRepository) -> AccountService<MockUserRepository> {
        AccountService::new(Arc::new(repo))
    }

    fn stored(username: &str, password: &str) -> StoredCredentials {
        StoredCredentials {
            user: User::try_from_strings(UserId::random().as_ref(), username).expect("user"),
            password: PasswordDigest::hash(password).expect("hash"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_stores_a_verifiable_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .withf(|user, digest| user.username().as_ref() == "reader" && digest.verify("pw"))
            .return_once(|_, _| Ok(()));

        let request = SignupRequest::validate("reader", "pw", "pw").expect("valid");
        let user = service(repo).sign_up(request).await.expect("signed up");
        assert_eq!(user.username().as_ref(), "reader");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_become_field_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .return_once(|_, _| Err(UserPersistenceError::duplicate_username("reader")));

        let request = SignupRequest::validate("reader", "pw", "pw").expect("valid");
        let err = service(repo).sign_up(request).await.expect_err("duplicate");
        let errors = err.form_errors().expect("form errors");
        assert_eq!(errors.field("username"), [DUPLICATE_USERNAME_MESSAGE]);
    }

    #[rstest]
    #[case("password", true)]
    #[case("wrong", false)]
    #[tokio::test]
    async fn authenticate_checks_password(#[case] password: &str, #[case] accepted: bool) {
        let credentials = stored("author", "password");
        let expected = credentials.user.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_credentials()
            .withf(|username| username == "author")
            .return_once(move |_| Ok(Some(credentials)));

        let login = LoginCredentials::try_from_parts("author", password).expect("shape");
        let result = service(repo).authenticate(&login).await;
        match (accepted, result) {
            (true, Ok(user)) => assert_eq!(user, expected),
            (false, Err(err)) => {
                let errors = err.form_errors().expect("form errors");
                assert_eq!(errors.field("__all__"), [INVALID_LOGIN_MESSAGE]);
            }
            (_, other) => panic!("unexpected result: {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_cannot_log_in() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_credentials().return_once(|_| Ok(None));

        let login = LoginCredentials::try_from_parts("ghost", "pw").expect("shape");
        let err = service(repo).authenticate(&login).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn repository_failures_map_to_domain_codes(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().return_once(move |_| Err(failure));

        let err = service(repo)
            .find_user(&UserId::random())
            .await
            .expect_err("failure");
        assert_eq!(err.code(), expected);
    }
}

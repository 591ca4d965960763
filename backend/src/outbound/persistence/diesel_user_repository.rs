//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserId, Username};

use super::error_mapping::{DatabaseFailure, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, username: Option<&str>) -> UserPersistenceError {
    match (classify(error), username) {
        (DatabaseFailure::Connection(message), _) => UserPersistenceError::connection(message),
        (DatabaseFailure::UniqueViolation { .. }, Some(username)) => {
            UserPersistenceError::duplicate_username(username)
        }
        (DatabaseFailure::UniqueViolation { .. }, None) => {
            UserPersistenceError::query("unexpected unique violation")
        }
        (DatabaseFailure::ForeignKeyViolation, _) => {
            UserPersistenceError::query("database constraint error")
        }
        (DatabaseFailure::Query(message), _) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: &UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(row.username.as_str()).map_err(|err| {
        UserPersistenceError::query(format!("invalid username in database: {err}"))
    })?;
    Ok(User::new(UserId::from_uuid(row.id), username))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password: &PasswordDigest,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: password.as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(user.username().as_ref())))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(|row| {
            Ok(StoredCredentials {
                user: row_to_user(&row)?,
                password: PasswordDigest::from_stored(row.password_hash),
            })
        })
        .transpose()
    }
}

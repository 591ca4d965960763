//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.
//!
//! Comments are always read joined with their author so the domain record
//! carries the author's username.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, NewsId, User, UserId, Username};

use super::error_mapping::{DatabaseFailure, classify};
use super::models::{CommentRow, NewCommentRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, users};

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    CommentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    news: Option<NewsId>,
) -> CommentRepositoryError {
    match (classify(error), news) {
        (DatabaseFailure::ForeignKeyViolation, Some(news)) => {
            CommentRepositoryError::missing_news(news.get())
        }
        (DatabaseFailure::Connection(message), _) => CommentRepositoryError::connection(message),
        (DatabaseFailure::Query(message), _) => CommentRepositoryError::query(message),
        (DatabaseFailure::UniqueViolation { .. } | DatabaseFailure::ForeignKeyViolation, _) => {
            CommentRepositoryError::query("database constraint error")
        }
    }
}

fn rows_to_comment((row, author): (CommentRow, UserRow)) -> Result<Comment, CommentRepositoryError> {
    let username = Username::new(author.username).map_err(|err| {
        CommentRepositoryError::query(format!("invalid username in database: {err}"))
    })?;
    Ok(Comment {
        id: CommentId::new(row.id),
        news: NewsId::new(row.news_id),
        author: User::new(UserId::from_uuid(author.id), username),
        text: row.text,
        created: row.created,
    })
}

impl DieselCommentRepository {
    async fn load_one(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = comments::table
            .inner_join(users::table)
            .filter(comments::id.eq(id.get()))
            .select((CommentRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(rows_to_comment).transpose()
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(
        &self,
        news: NewsId,
        author: &UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError> {
        let id: i64 = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewCommentRow {
                news_id: news.get(),
                author_id: *author.as_uuid(),
                text,
                created,
            };
            diesel::insert_into(comments::table)
                .values(&row)
                .returning(comments::id)
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, Some(news)))?
        };
        self.load_one(CommentId::new(id))
            .await?
            .ok_or_else(|| CommentRepositoryError::query("inserted comment vanished"))
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        self.load_one(id).await
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let updated = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(comments::table.filter(comments::id.eq(id.get())))
                .set(comments::text.eq(text))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, None))?
        };
        if updated == 0 {
            return Ok(None);
        }
        self.load_one(id).await
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(comments::table.filter(comments::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(deleted > 0)
    }

    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CommentRow, UserRow)> = comments::table
            .inner_join(users::table)
            .filter(comments::news_id.eq(news.get()))
            .order((comments::created.asc(), comments::id.asc()))
            .select((CommentRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(rows_to_comment).collect()
    }
}

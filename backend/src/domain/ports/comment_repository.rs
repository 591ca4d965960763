//! Port for comment persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, CommentId, NewsId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The parent news item does not exist.
        MissingNews { news_id: i64 } => "news {news_id} does not exist",
    }
}

/// Port for storing comments on news items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a comment.
    async fn insert(
        &self,
        news: NewsId,
        author: &UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Replace a comment's text, returning `None` if it no longer exists.
    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Remove a comment, returning whether a row was deleted.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;

    /// Comments on `news` ordered by creation time, oldest first.
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError>;
}

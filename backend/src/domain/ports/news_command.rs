//! Driving ports for the news site.

use async_trait::async_trait;
use pagination::Page;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Comment, CommentId, Error, News, NewsDraft, NewsId, UserId};

/// A news item with its comments in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NewsDetail {
    #[serde(flatten)]
    pub news: News,
    pub comments: Vec<Comment>,
}

/// Read-only news use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// Newest-first page of news starting after the opaque `cursor`.
    async fn home_page(&self, cursor: Option<String>) -> Result<Page<News>, Error>;

    /// A news item and its comments.
    async fn detail(&self, id: NewsId) -> Result<NewsDetail, Error>;

    /// The comment `id` when `author` wrote it.
    async fn owned_comment(&self, author: &UserId, id: CommentId) -> Result<Comment, Error>;
}

/// Mutating news and comment use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsCommand: Send + Sync {
    /// Publish a news item, dating it now unless a date is given.
    async fn publish(&self, draft: NewsDraft) -> Result<News, Error>;

    /// Comment on `news` as `author`.
    async fn add_comment(&self, author: &UserId, news: NewsId, text: &str)
    -> Result<Comment, Error>;

    /// Replace the text of a comment written by `author`.
    async fn edit_comment(&self, author: &UserId, id: CommentId, text: &str)
    -> Result<Comment, Error>;

    /// Delete a comment written by `author`, returning it.
    async fn delete_comment(&self, author: &UserId, id: CommentId) -> Result<Comment, Error>;
}

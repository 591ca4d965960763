//! News and comment domain services.
//!
//! Comment text passes through the [`BannedWords`] filter on both creation
//! and edit. Comments written by someone else are reported as not found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Cursor, Page};
use tracing::info;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, NewsCommand, NewsDetail, NewsQuery,
    NewsRepository, NewsRepositoryError,
};
use crate::domain::form::max_length;
use crate::domain::{
    BannedWords, Comment, CommentId, CommentText, Error, FormErrors, NEWS_TITLE_MAX, News,
    NewsCursorKey, NewsDraft, NewsId, UserId,
};

/// Default number of news items on the home page.
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

fn map_news_error(error: NewsRepositoryError) -> Error {
    match error {
        NewsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("news repository unavailable: {message}"))
        }
        NewsRepositoryError::Query { message } => {
            Error::internal(format!("news repository error: {message}"))
        }
    }
}

fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::MissingNews { news_id } => news_not_found(NewsId::new(news_id)),
    }
}

fn news_not_found(id: NewsId) -> Error {
    Error::not_found(format!("news {id} not found"))
}

fn comment_not_found() -> Error {
    Error::not_found("comment not found")
}

/// Tunables for [`NewsService`].
#[derive(Debug, Clone)]
pub struct NewsSettings {
    /// Maximum items per home page.
    pub page_size: usize,
    /// Filter applied to comment text.
    pub banned_words: BannedWords,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            page_size: NEWS_COUNT_ON_HOME_PAGE,
            banned_words: BannedWords::default(),
        }
    }
}

/// News service implementing the news driving ports.
#[derive(Clone)]
pub struct NewsService<N, C> {
    news_repo: Arc<N>,
    comment_repo: Arc<C>,
    clock: Arc<dyn Clock>,
    settings: NewsSettings,
}

impl<N, C> NewsService<N, C> {
    /// Create a new news service.
    ///
    /// A page size of zero is treated as one.
    pub fn new(
        news_repo: Arc<N>,
        comment_repo: Arc<C>,
        clock: Arc<dyn Clock>,
        mut settings: NewsSettings,
    ) -> Self {
        settings.page_size = settings.page_size.max(1);
        Self {
            news_repo,
            comment_repo,
            clock,
            settings,
        }
    }
}

impl<N, C> NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn require_news(&self, id: NewsId) -> Result<News, Error> {
        self.news_repo
            .find_by_id(id)
            .await
            .map_err(map_news_error)?
            .ok_or_else(|| news_not_found(id))
    }

    async fn find_owned_comment(&self, author: &UserId, id: CommentId) -> Result<Comment, Error> {
        self.comment_repo
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?
            .filter(|comment| comment.author.id() == author)
            .ok_or_else(comment_not_found)
    }

    fn validate_text(&self, text: &str) -> Result<CommentText, Error> {
        CommentText::validate(text, &self.settings.banned_words).map_err(Error::validation)
    }
}

#[async_trait]
impl<N, C> NewsQuery for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn home_page(&self, cursor: Option<String>) -> Result<Page<News>, Error> {
        let after = cursor
            .as_deref()
            .map(Cursor::<NewsCursorKey>::decode)
            .transpose()
            .map_err(|err| Error::invalid_request(format!("invalid cursor: {err}")))?
            .map(Cursor::into_key);

        let limit = self.settings.page_size;
        let items = self
            .news_repo
            .list_page(limit.saturating_add(1), after)
            .await
            .map_err(map_news_error)?;

        Page::from_overfetch(items, limit, News::cursor_key)
            .map_err(|err| Error::internal(format!("failed to encode cursor: {err}")))
    }

    async fn detail(&self, id: NewsId) -> Result<NewsDetail, Error> {
        let news = self.require_news(id).await?;
        let comments = self
            .comment_repo
            .list_for_news(id)
            .await
            .map_err(map_comment_error)?;
        Ok(NewsDetail { news, comments })
    }

    async fn owned_comment(&self, author: &UserId, id: CommentId) -> Result<Comment, Error> {
        self.find_owned_comment(author, id).await
    }
}

#[async_trait]
impl<N, C> NewsCommand for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn publish(&self, draft: NewsDraft) -> Result<News, Error> {
        let title = draft.title.trim();
        let text = draft.text.trim();
        if title.is_empty() || text.is_empty() {
            return Err(Error::invalid_request("news title and text are required"));
        }
        let mut errors = FormErrors::default();
        max_length(&mut errors, "title", title, NEWS_TITLE_MAX);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }
        let date = draft.date.unwrap_or_else(|| self.clock.utc());
        let news = self
            .news_repo
            .insert(title, text, date)
            .await
            .map_err(map_news_error)?;
        info!(news_id = %news.id, "news published");
        Ok(news)
    }

    async fn add_comment(
        &self,
        author: &UserId,
        news: NewsId,
        text: &str,
    ) -> Result<Comment, Error> {
        self.require_news(news).await?;
        let text = self.validate_text(text)?;
        let comment = self
            .comment_repo
            .insert(news, author, text.as_str(), self.clock.utc())
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, news_id = %news, author = %author, "comment added");
        Ok(comment)
    }

    async fn edit_comment(
        &self,
        author: &UserId,
        id: CommentId,
        text: &str,
    ) -> Result<Comment, Error> {
        self.find_owned_comment(author, id).await?;
        let text = self.validate_text(text)?;
        let comment = self
            .comment_repo
            .update_text(id, text.as_str())
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)?;
        info!(comment_id = %id, "comment edited");
        Ok(comment)
    }

    async fn delete_comment(&self, author: &UserId, id: CommentId) -> Result<Comment, Error> {
        let comment = self.find_owned_comment(author, id).await?;
        let deleted = self
            .comment_repo
            .delete(id)
            .await
            .map_err(map_comment_error)?;
        if !deleted {
            return Err(comment_not_found());
        }
        info!(comment_id = %id, news_id = %comment.news, "comment deleted");
        Ok(comment)
    }
}

#[cfg(test)]
#[path = "news_service_tests.rs"]
mod tests;

//! Port for news persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{News, NewsCursorKey, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by news repository adapters.
    pub enum NewsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "news repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "news repository query failed: {message}",
    }
}

/// Port for storing and listing news items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Persist a news item.
    async fn insert(
        &self,
        title: &str,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<News, NewsRepositoryError>;

    /// Fetch a news item by identifier.
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError>;

    /// Newest-first listing of at most `limit` items strictly after `after`.
    ///
    /// Ordering is date descending, then id descending.
    async fn list_page(
        &self,
        limit: usize,
        after: Option<NewsCursorKey>,
    ) -> Result<Vec<News>, NewsRepositoryError>;

    /// Remove a news item and its comments.
    async fn delete(&self, id: NewsId) -> Result<bool, NewsRepositoryError>;
}

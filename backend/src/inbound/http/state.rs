//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, NewsCommand, NewsQuery, NoteCommand, NoteQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NoteQuery>,
    pub news: Arc<dyn NewsCommand>,
    pub news_query: Arc<dyn NewsQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// A single service value usually implements both halves of a
    /// command/query pair, so callers pass the same `Arc` twice:
    ///
    /// ```ignore
    /// let notes = Arc::new(NoteService::new(repo.clone()));
    /// let news = Arc::new(NewsService::new(repo.clone(), repo, clock, settings));
    /// let state = HttpState::new(accounts, notes.clone(), notes, news.clone(), news);
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        notes: Arc<dyn NoteCommand>,
        notes_query: Arc<dyn NoteQuery>,
        news: Arc<dyn NewsCommand>,
        news_query: Arc<dyn NewsQuery>,
    ) -> Self {
        Self {
            accounts,
            notes,
            notes_query,
            news,
            news_query,
        }
    }
}

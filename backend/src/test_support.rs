//! Test utilities for the noticeboard crate.
//!
//! Shared by unit tests (in `src/`) and the integration suites (in `tests/`,
//! through the `test-support` feature). Everything here runs in-process on
//! the in-memory adapter.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{AccountService, NewsService, NewsSettings, NoteService};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryRepository;

/// Session middleware with a throwaway key and insecure cookies, so the
/// plain-HTTP test server accepts them.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Fixed instant used by [`FixtureClock`].
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Clock frozen at [`fixture_timestamp`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_timestamp().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }
}

/// In-memory services plus the repository behind them.
///
/// Tests seed or inspect data through `repo` and drive the HTTP layer with
/// `state`.
#[derive(Clone)]
pub struct InMemoryBackend {
    pub repo: Arc<InMemoryRepository>,
    pub state: HttpState,
}

impl InMemoryBackend {
    /// Wire every service onto one fresh repository.
    pub fn new(news_settings: NewsSettings) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        let state = in_memory_state(repo.clone(), Arc::new(FixtureClock), news_settings);
        Self { repo, state }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(NewsSettings::default())
    }
}

/// Build [`HttpState`] over a shared in-memory repository.
pub fn in_memory_state(
    repo: Arc<InMemoryRepository>,
    clock: Arc<dyn Clock>,
    news_settings: NewsSettings,
) -> HttpState {
    let accounts = Arc::new(AccountService::new(repo.clone()));
    let notes = Arc::new(NoteService::new(repo.clone()));
    let news = Arc::new(NewsService::new(repo.clone(), repo, clock, news_settings));
    HttpState::new(accounts, notes.clone(), notes, news.clone(), news)
}

//! Build HTTP and health state from server configuration.
//!
//! With a database pool every port is served by its Diesel adapter;
//! without one a single in-memory repository backs all of them, so data
//! lives only as long as the process.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use noticeboard::domain::ports::{
    CommentRepository, NewsRepository, NoteRepository, UserRepository,
};
use noticeboard::domain::{AccountService, NewsService, NewsSettings, NoteService};
use noticeboard::inbound::http::health::HealthState;
use noticeboard::inbound::http::state::HttpState;
use noticeboard::outbound::memory::InMemoryRepository;
use noticeboard::outbound::persistence::{
    DieselCommentRepository, DieselNewsRepository, DieselNoteRepository, DieselUserRepository,
};

use super::ServerConfig;

fn wire_services<U, N, W, C>(
    users: Arc<U>,
    notes: Arc<N>,
    news: Arc<W>,
    comments: Arc<C>,
    news_settings: NewsSettings,
) -> HttpState
where
    U: UserRepository + 'static,
    N: NoteRepository + 'static,
    W: NewsRepository + 'static,
    C: CommentRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let accounts = Arc::new(AccountService::new(users));
    let notes = Arc::new(NoteService::new(notes));
    let news = Arc::new(NewsService::new(news, comments, clock, news_settings));
    HttpState::new(accounts, notes.clone(), notes, news.clone(), news)
}

/// Build the handler state for `config`.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => wire_services(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselNoteRepository::new(pool.clone())),
            Arc::new(DieselNewsRepository::new(pool.clone())),
            Arc::new(DieselCommentRepository::new(pool.clone())),
            config.news.clone(),
        ),
        None => {
            warn!("no database configured; using the in-memory store");
            let repo = Arc::new(InMemoryRepository::new());
            wire_services(repo.clone(), repo.clone(), repo.clone(), repo, config.news.clone())
        }
    };
    web::Data::new(state)
}

/// Build readiness state, probing the database when one is configured.
pub(super) fn build_health_state(config: &ServerConfig) -> web::Data<HealthState> {
    let health = HealthState::new();
    let health = match &config.db_pool {
        Some(pool) => health.with_probe(Arc::new(pool.clone())),
        None => health,
    };
    web::Data::new(health)
}

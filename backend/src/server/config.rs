//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use noticeboard::domain::NewsSettings;
use noticeboard::inbound::http::session_config::SessionSettings;
use noticeboard::outbound::persistence::DbPool;
use noticeboard::settings::Site;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) site: Site,
    pub(crate) news: NewsSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory adapter.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, site: Site) -> Self {
        Self {
            session,
            bind_addr,
            site,
            news: NewsSettings::default(),
            db_pool: None,
        }
    }

    /// Override page size and banned words for the news site.
    #[must_use]
    pub fn with_news_settings(mut self, news: NewsSettings) -> Self {
        self.news = news;
        self
    }

    /// Attach a database connection pool; repositories then use PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

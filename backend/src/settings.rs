//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from CLI flags, a configuration file or
//! `NOTICEBOARD_*` environment variables; unset values fall back to the
//! defaults below.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::banned_words::{DEFAULT_BANNED_WORDS, DEFAULT_WARNING};
use crate::domain::{BannedWords, NewsSettings};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Which application is mounted at `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Site {
    /// Personal notes.
    #[default]
    Notes,
    /// News with comments.
    News,
}

impl FromStr for Site {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "notes" => Ok(Self::Notes),
            "news" => Ok(Self::News),
            _ => Err(SettingsError::UnknownSite(value.to_owned())),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Notes => "notes",
            Self::News => "news",
        })
    }
}

/// Invalid setting values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `site` names neither application.
    #[error("unknown site '{0}'; expected notes or news")]
    UnknownSite(String),
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTICEBOARD")]
pub struct AppSettings {
    /// `notes` or `news`.
    pub site: Option<String>,
    /// Listen address, `0.0.0.0:8080` by default.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without one the in-memory store is used.
    pub database_url: Option<String>,
    /// News items per home page.
    #[ortho_config(default = 10)]
    pub news_page_size: usize,
    /// Words rejected in comments; a comma-separated list in the environment.
    pub banned_words: Option<Vec<String>>,
    /// Message shown when a comment contains a banned word.
    pub banned_word_warning: Option<String>,
}

impl AppSettings {
    /// Selected site, notes by default.
    pub fn site(&self) -> Result<Site, SettingsError> {
        self.site
            .as_deref()
            .map_or(Ok(Site::default()), Site::from_str)
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Comment filter built from the configured words and warning.
    pub fn banned_words(&self) -> BannedWords {
        let warning = self.banned_word_warning.as_deref().unwrap_or(DEFAULT_WARNING);
        match self.banned_words.as_deref() {
            Some(words) => BannedWords::new(words, warning),
            None => BannedWords::new(DEFAULT_BANNED_WORDS.iter().copied(), warning),
        }
    }

    /// Settings handed to the news service.
    pub fn news_settings(&self) -> NewsSettings {
        NewsSettings {
            page_size: self.news_page_size,
            banned_words: self.banned_words(),
        }
    }
}

//! HTTP inbound adapter: views rendering JSON contexts, session handling and
//! health probes.

pub mod accounts;
pub mod error;
pub mod forms;
pub mod health;
pub mod news;
pub mod notes;
pub mod pages;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;

pub use error::ApiResult;

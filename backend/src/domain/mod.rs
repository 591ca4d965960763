//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, plus the services implementing the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, Note, News, Comment: the persisted records.
//! - AccountService, NoteService, NewsService: driving port implementations.

pub mod auth;
pub mod banned_words;
pub mod error;
pub mod form;
pub mod news;
pub mod note;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;

mod account_service;
mod news_service;
mod note_service;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordDigest, PasswordHashError, SignupRequest,
};
pub use self::banned_words::BannedWords;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::form::FormErrors;
pub use self::news::{
    Comment, CommentId, CommentText, NEWS_TITLE_MAX, News, NewsCursorKey, NewsDraft, NewsId,
};
pub use self::news_service::{NEWS_COUNT_ON_HOME_PAGE, NewsService, NewsSettings};
pub use self::note::{Note, NoteDraft, NoteId};
pub use self::note_service::NoteService;
pub use self::slug::{Slug, SlugValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use noticeboard::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("note not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

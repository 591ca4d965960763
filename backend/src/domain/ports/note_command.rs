//! Driving ports for the personal notes site.
//!
//! Every operation is scoped to the requesting user: notes owned by someone
//! else are reported as not found.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteDraft, UserId};

/// Mutating note use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteCommand: Send + Sync {
    /// Create a note owned by `author`.
    async fn create(&self, author: &UserId, draft: NoteDraft) -> Result<Note, Error>;

    /// Replace the fields of the note at `slug` owned by `author`.
    async fn update(&self, author: &UserId, slug: &str, draft: NoteDraft) -> Result<Note, Error>;

    /// Delete the note at `slug` owned by `author`.
    async fn delete(&self, author: &UserId, slug: &str) -> Result<(), Error>;
}

/// Read-only note use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteQuery: Send + Sync {
    /// Notes owned by `author`.
    async fn list(&self, author: &UserId) -> Result<Vec<Note>, Error>;

    /// The note at `slug` when `author` owns it.
    async fn get_owned(&self, author: &UserId, slug: &str) -> Result<Note, Error>;
}

//! Port for note persistence.

use async_trait::async_trait;

use crate::domain::{Note, NoteDraft, NoteId, Slug, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// Another note already uses the slug.
        DuplicateSlug { slug: String } => "note slug {slug} is already taken",
    }
}

/// Port for storing and reading notes.
///
/// Adapters enforce slug uniqueness atomically with the write and report
/// collisions as [`NoteRepositoryError::DuplicateSlug`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a new note owned by `author`.
    async fn insert(&self, author: &UserId, draft: &NoteDraft) -> Result<Note, NoteRepositoryError>;

    /// Overwrite title, text and slug of an existing note.
    ///
    /// Returns `None` when the note no longer exists.
    async fn update(&self, id: NoteId, draft: &NoteDraft)
    -> Result<Option<Note>, NoteRepositoryError>;

    /// Remove a note, returning whether a row was deleted.
    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError>;

    /// Look a note up by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError>;

    /// Notes owned by `author`, oldest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError>;
}

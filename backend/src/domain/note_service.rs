//! Note domain services.
//!
//! These services implement the note driving ports. Ownership is checked
//! here: a note that exists but belongs to someone else is reported exactly
//! like a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::note::duplicate_slug_message;
use crate::domain::ports::{NoteCommand, NoteQuery, NoteRepository, NoteRepositoryError};
use crate::domain::{Error, FormErrors, Note, NoteDraft, Slug, UserId};

fn map_repository_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
        NoteRepositoryError::DuplicateSlug { slug } => {
            let mut errors = FormErrors::default();
            errors.add("slug", duplicate_slug_message(&slug));
            Error::validation(errors)
        }
    }
}

fn note_not_found() -> Error {
    Error::not_found("note not found")
}

/// Note service implementing both note driving ports.
#[derive(Clone)]
pub struct NoteService<R> {
    note_repo: Arc<R>,
}

impl<R> NoteService<R> {
    /// Create a new note service with the note repository.
    pub fn new(note_repo: Arc<R>) -> Self {
        Self { note_repo }
    }
}

impl<R> NoteService<R>
where
    R: NoteRepository,
{
    async fn find_owned(&self, author: &UserId, slug: &str) -> Result<Note, Error> {
        let Ok(slug) = Slug::new(slug) else {
            return Err(note_not_found());
        };
        self.note_repo
            .find_by_slug(&slug)
            .await
            .map_err(map_repository_error)?
            .filter(|note| note.is_owned_by(author))
            .ok_or_else(note_not_found)
    }
}

#[async_trait]
impl<R> NoteCommand for NoteService<R>
where
    R: NoteRepository,
{
    async fn create(&self, author: &UserId, draft: NoteDraft) -> Result<Note, Error> {
        let note = self
            .note_repo
            .insert(author, &draft)
            .await
            .map_err(map_repository_error)?;
        info!(note_id = %note.id(), slug = %note.slug(), author = %author, "note created");
        Ok(note)
    }

    async fn update(&self, author: &UserId, slug: &str, draft: NoteDraft) -> Result<Note, Error> {
        let existing = self.find_owned(author, slug).await?;
        let note = self
            .note_repo
            .update(existing.id(), &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(note_not_found)?;
        info!(note_id = %note.id(), slug = %note.slug(), "note updated");
        Ok(note)
    }

    async fn delete(&self, author: &UserId, slug: &str) -> Result<(), Error> {
        let existing = self.find_owned(author, slug).await?;
        let deleted = self
            .note_repo
            .delete(existing.id())
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(note_not_found());
        }
        info!(note_id = %existing.id(), slug = %existing.slug(), "note deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> NoteQuery for NoteService<R>
where
    R: NoteRepository,
{
    async fn list(&self, author: &UserId) -> Result<Vec<Note>, Error> {
        self.note_repo
            .list_by_author(author)
            .await
            .map_err(map_repository_error)
    }

    async fn get_owned(&self, author: &UserId, slug: &str) -> Result<Note, Error> {
        self.find_owned(author, slug).await
    }
}

#[cfg(test)]
#[path = "note_service_tests.rs"]
mod tests;

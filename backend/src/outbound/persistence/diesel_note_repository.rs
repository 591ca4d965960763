//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.
//!
//! Slug uniqueness is enforced by the `notes_slug_key` unique index; a
//! violation on insert or update becomes
//! [`NoteRepositoryError::DuplicateSlug`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, Slug, UserId};

use super::error_mapping::{DatabaseFailure, classify};
use super::models::{NewNoteRow, NoteChangeset, NoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

const SLUG_CONSTRAINT: &str = "notes_slug_key";

/// Diesel-backed implementation of the `NoteRepository` port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NoteRepositoryError {
    NoteRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, slug: Option<&Slug>) -> NoteRepositoryError {
    let failure = classify(error);
    if let Some(slug) = slug.filter(|_| failure.is_unique_violation_of(SLUG_CONSTRAINT)) {
        return NoteRepositoryError::duplicate_slug(slug.as_ref());
    }
    match failure {
        DatabaseFailure::Connection(message) => NoteRepositoryError::connection(message),
        DatabaseFailure::Query(message) => NoteRepositoryError::query(message),
        DatabaseFailure::UniqueViolation { .. } | DatabaseFailure::ForeignKeyViolation => {
            NoteRepositoryError::query("database constraint error")
        }
    }
}

fn row_to_note(row: NoteRow) -> Result<Note, NoteRepositoryError> {
    let slug = Slug::new(row.slug)
        .map_err(|err| NoteRepositoryError::query(format!("invalid slug in database: {err}")))?;
    Ok(Note::new(
        NoteId::new(row.id),
        UserId::from_uuid(row.author_id),
        NoteDraft::from_parts(row.title, row.text, slug),
    ))
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn insert(&self, author: &UserId, draft: &NoteDraft) -> Result<Note, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNoteRow {
            title: draft.title(),
            text: draft.text(),
            slug: draft.slug().as_ref(),
            author_id: *author.as_uuid(),
        };
        let stored = diesel::insert_into(notes::table)
            .values(&row)
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(draft.slug())))?;
        row_to_note(stored)
    }

    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = NoteChangeset {
            title: draft.title(),
            text: draft.text(),
            slug: draft.slug().as_ref(),
        };
        let stored = diesel::update(notes::table.filter(notes::id.eq(id.get())))
            .set(&changes)
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(draft.slug())))?;
        stored.map(row_to_note).transpose()
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(notes::table.filter(notes::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(deleted > 0)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = notes::table
            .filter(notes::slug.eq(slug.as_ref()))
            .select(NoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        stored.map(row_to_note).transpose()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NoteRow> = notes::table
            .filter(notes::author_id.eq(*author.as_uuid()))
            .order(notes::id.asc())
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_note).collect()
    }
}

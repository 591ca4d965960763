//! In-process adapter implementing every repository port.
//!
//! All tables sit behind one mutex so uniqueness checks and writes happen in
//! the same critical section. Used for local runs without `database_url` and
//! by the HTTP test suites.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, NewsRepository, NewsRepositoryError,
    NoteRepository, NoteRepositoryError, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, CommentId, News, NewsCursorKey, NewsId, Note, NoteDraft, NoteId, PasswordDigest,
    Slug, User, UserId,
};

#[derive(Debug, Clone)]
struct CommentRow {
    id: CommentId,
    news: NewsId,
    author: UserId,
    text: String,
    created: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<StoredCredentials>,
    notes: Vec<Note>,
    news: Vec<News>,
    comments: Vec<CommentRow>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn user(&self, id: &UserId) -> Option<&User> {
        self.users
            .iter()
            .map(|stored| &stored.user)
            .find(|user| user.id() == id)
    }

    fn comment(&self, row: &CommentRow) -> Option<Comment> {
        let author = self.user(&row.author)?.clone();
        Some(Comment {
            id: row.id,
            news: row.news,
            author,
            text: row.text.clone(),
            created: row.created,
        })
    }

    fn slug_taken(&self, slug: &Slug, excluding: Option<NoteId>) -> bool {
        self.notes
            .iter()
            .any(|note| note.slug() == slug && Some(note.id()) != excluding)
    }
}

/// Mutex-guarded tables for users, notes, news and comments.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory tables are poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert(
        &self,
        user: &User,
        password: &PasswordDigest,
    ) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables
            .users
            .iter()
            .any(|stored| stored.user.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        tables.users.push(StoredCredentials {
            user: user.clone(),
            password: password.clone(),
        });
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.user(id).cloned())
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .iter()
            .find(|stored| stored.user.username().as_ref() == username)
            .cloned())
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn insert(&self, author: &UserId, draft: &NoteDraft) -> Result<Note, NoteRepositoryError> {
        let mut tables = self.lock().map_err(NoteRepositoryError::query)?;
        if tables.slug_taken(draft.slug(), None) {
            return Err(NoteRepositoryError::duplicate_slug(draft.slug().as_ref()));
        }
        let id = NoteId::new(tables.next_id());
        let note = Note::new(id, author.clone(), draft.clone());
        tables.notes.push(note.clone());
        Ok(note)
    }

    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut tables = self.lock().map_err(NoteRepositoryError::query)?;
        if tables.slug_taken(draft.slug(), Some(id)) {
            return Err(NoteRepositoryError::duplicate_slug(draft.slug().as_ref()));
        }
        let Some(slot) = tables.notes.iter_mut().find(|note| note.id() == id) else {
            return Ok(None);
        };
        *slot = slot.with_draft(draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut tables = self.lock().map_err(NoteRepositoryError::query)?;
        let before = tables.notes.len();
        tables.notes.retain(|note| note.id() != id);
        Ok(tables.notes.len() != before)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError> {
        let tables = self.lock().map_err(NoteRepositoryError::query)?;
        Ok(tables.notes.iter().find(|note| note.slug() == slug).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let tables = self.lock().map_err(NoteRepositoryError::query)?;
        Ok(tables
            .notes
            .iter()
            .filter(|note| note.is_owned_by(author))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NewsRepository for InMemoryRepository {
    async fn insert(
        &self,
        title: &str,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<News, NewsRepositoryError> {
        let mut tables = self.lock().map_err(NewsRepositoryError::query)?;
        let news = News {
            id: NewsId::new(tables.next_id()),
            title: title.to_owned(),
            text: text.to_owned(),
            date,
        };
        tables.news.push(news.clone());
        Ok(news)
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        let tables = self.lock().map_err(NewsRepositoryError::query)?;
        Ok(tables.news.iter().find(|news| news.id == id).cloned())
    }

    async fn list_page(
        &self,
        limit: usize,
        after: Option<NewsCursorKey>,
    ) -> Result<Vec<News>, NewsRepositoryError> {
        let tables = self.lock().map_err(NewsRepositoryError::query)?;
        let mut items: Vec<News> = tables
            .news
            .iter()
            .filter(|news| after.is_none_or(|key| key.precedes(news)))
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
        items.truncate(limit);
        Ok(items)
    }

    async fn delete(&self, id: NewsId) -> Result<bool, NewsRepositoryError> {
        let mut tables = self.lock().map_err(NewsRepositoryError::query)?;
        let before = tables.news.len();
        tables.news.retain(|news| news.id != id);
        tables.comments.retain(|comment| comment.news != id);
        Ok(tables.news.len() != before)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository {
    async fn insert(
        &self,
        news: NewsId,
        author: &UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.lock().map_err(CommentRepositoryError::query)?;
        if !tables.news.iter().any(|item| item.id == news) {
            return Err(CommentRepositoryError::missing_news(news.get()));
        }
        let row = CommentRow {
            id: CommentId::new(tables.next_id()),
            news,
            author: author.clone(),
            text: text.to_owned(),
            created,
        };
        let comment = tables
            .comment(&row)
            .ok_or_else(|| CommentRepositoryError::query(format!("unknown author {author}")))?;
        tables.comments.push(row);
        Ok(comment)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let tables = self.lock().map_err(CommentRepositoryError::query)?;
        Ok(tables
            .comments
            .iter()
            .find(|row| row.id == id)
            .and_then(|row| tables.comment(row)))
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut tables = self.lock().map_err(CommentRepositoryError::query)?;
        let Some(row) = tables.comments.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        row.text = text.to_owned();
        let row = row.clone();
        Ok(tables.comment(&row))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut tables = self.lock().map_err(CommentRepositoryError::query)?;
        let before = tables.comments.len();
        tables.comments.retain(|row| row.id != id);
        Ok(tables.comments.len() != before)
    }

    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let tables = self.lock().map_err(CommentRepositoryError::query)?;
        let mut rows: Vec<&CommentRow> = tables
            .comments
            .iter()
            .filter(|row| row.news == news)
            .collect();
        rows.sort_by_key(|row| (row.created, row.id));
        Ok(rows.into_iter().filter_map(|row| tables.comment(row)).collect())
    }
}

//! PostgreSQL-backed `NewsRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewsRepository, NewsRepositoryError};
use crate::domain::{News, NewsCursorKey, NewsId};

use super::error_mapping::{DatabaseFailure, classify};
use super::models::{NewNewsRow, NewsRow};
use super::pool::{DbPool, PoolError};
use super::schema::news;

/// Diesel-backed implementation of the `NewsRepository` port.
#[derive(Clone)]
pub struct DieselNewsRepository {
    pool: DbPool,
}

impl DieselNewsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NewsRepositoryError {
    NewsRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> NewsRepositoryError {
    match classify(error) {
        DatabaseFailure::Connection(message) => NewsRepositoryError::connection(message),
        DatabaseFailure::Query(message) => NewsRepositoryError::query(message),
        DatabaseFailure::UniqueViolation { .. } | DatabaseFailure::ForeignKeyViolation => {
            NewsRepositoryError::query("database constraint error")
        }
    }
}

fn row_to_news(row: NewsRow) -> News {
    News {
        id: NewsId::new(row.id),
        title: row.title,
        text: row.text,
        date: row.date,
    }
}

fn page_size(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl NewsRepository for DieselNewsRepository {
    async fn insert(
        &self,
        title: &str,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<News, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNewsRow { title, text, date };
        diesel::insert_into(news::table)
            .values(&row)
            .returning(NewsRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_news)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        news::table
            .filter(news::id.eq(id.get()))
            .select(NewsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_news))
            .map_err(map_diesel_error)
    }

    async fn list_page(
        &self,
        limit: usize,
        after: Option<NewsCursorKey>,
    ) -> Result<Vec<News>, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = news::table
            .select(NewsRow::as_select())
            .order((news::date.desc(), news::id.desc()))
            .limit(page_size(limit))
            .into_boxed();
        if let Some(key) = after {
            query = query.filter(
                news::date
                    .lt(key.date)
                    .or(news::date.eq(key.date).and(news::id.lt(key.id.get()))),
            );
        }
        let rows: Vec<NewsRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_news).collect())
    }

    async fn delete(&self, id: NewsId) -> Result<bool, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(news::table.filter(news::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(11, 11)]
    #[case(usize::MAX, i64::MAX)]
    fn page_size_saturates(#[case] limit: usize, #[case] expected: i64) {
        assert_eq!(page_size(limit), expected);
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, NewsRepositoryError::query("record not found"));
    }
}

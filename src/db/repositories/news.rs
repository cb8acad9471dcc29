//! News repository
//!
//! Database operations for news items. The public site only reads news;
//! creation and deletion exist for operators and fixtures.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{CreateNewsInput, NewsItem};

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a news item
    async fn create(&self, input: CreateNewsInput) -> Result<NewsItem>;

    /// Get a news item by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<NewsItem>>;

    /// List the most recent news items, newest first
    async fn list_recent(&self, limit: i64) -> Result<Vec<NewsItem>>;

    /// Delete a news item (comments are removed by cascade)
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count all news items
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based news repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxNewsRepository {
    pool: DynDatabasePool,
}

impl SqlxNewsRepository {
    /// Create a new SQLx news repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, input: CreateNewsInput) -> Result<NewsItem> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<NewsItem>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<NewsItem>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_recent_sqlite(self.pool.as_sqlite().unwrap(), limit).await
            }
            DatabaseDriver::Mysql => list_recent_mysql(self.pool.as_mysql().unwrap(), limit).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_sqlite(pool: &SqlitePool, input: CreateNewsInput) -> Result<NewsItem> {
    let date = input.date.unwrap_or_else(Utc::now);
    let result = sqlx::query("INSERT INTO news (title, text, date) VALUES (?, ?, ?)")
        .bind(&input.title)
        .bind(&input.text)
        .bind(date)
        .execute(pool)
        .await
        .context("Failed to create news item")?;

    Ok(NewsItem {
        id: result.last_insert_rowid(),
        title: input.title,
        text: input.text,
        date,
    })
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<NewsItem>> {
    let row = sqlx::query("SELECT id, title, text, date FROM news WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get news item by ID")?;

    Ok(row.map(|r| row_to_news(&r)))
}

async fn list_recent_sqlite(pool: &SqlitePool, limit: i64) -> Result<Vec<NewsItem>> {
    let rows = sqlx::query("SELECT id, title, text, date FROM news ORDER BY date DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("Failed to list recent news")?;

    Ok(rows.iter().map(row_to_news).collect())
}

async fn delete_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete news item")?;

    Ok(result.rows_affected() > 0)
}

async fn count_sqlite(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
        .fetch_one(pool)
        .await
        .context("Failed to count news")?;
    Ok(count)
}

fn row_to_news(row: &sqlx::sqlite::SqliteRow) -> NewsItem {
    NewsItem {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        date: row.get("date"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_mysql(pool: &MySqlPool, input: CreateNewsInput) -> Result<NewsItem> {
    let date = input.date.unwrap_or_else(Utc::now);
    let result = sqlx::query("INSERT INTO news (title, text, date) VALUES (?, ?, ?)")
        .bind(&input.title)
        .bind(&input.text)
        .bind(date)
        .execute(pool)
        .await
        .context("Failed to create news item")?;

    Ok(NewsItem {
        id: result.last_insert_id() as i64,
        title: input.title,
        text: input.text,
        date,
    })
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<NewsItem>> {
    let row = sqlx::query("SELECT id, title, text, date FROM news WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get news item by ID")?;

    Ok(row.map(|r| row_to_news_mysql(&r)))
}

async fn list_recent_mysql(pool: &MySqlPool, limit: i64) -> Result<Vec<NewsItem>> {
    let rows = sqlx::query("SELECT id, title, text, date FROM news ORDER BY date DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("Failed to list recent news")?;

    Ok(rows.iter().map(row_to_news_mysql).collect())
}

async fn delete_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete news item")?;

    Ok(result.rows_affected() > 0)
}

async fn count_mysql(pool: &MySqlPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
        .fetch_one(pool)
        .await
        .context("Failed to count news")?;
    Ok(count)
}

fn row_to_news_mysql(row: &sqlx::mysql::MySqlRow) -> NewsItem {
    NewsItem {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        date: row.get("date"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::Duration;

    async fn setup_test_repo() -> SqlxNewsRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxNewsRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(CreateNewsInput::new("Заголовок", "Текст"))
            .await
            .expect("Failed to create news");
        assert!(created.id > 0);

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to query")
            .expect("News not found");
        assert_eq!(found.title, "Заголовок");
        assert_eq!(found.text, "Текст");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let repo = setup_test_repo().await;
        assert!(repo.get_by_id(999).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first_and_limits() {
        let repo = setup_test_repo().await;
        let today = Utc::now();

        for index in 0..11 {
            repo.create(
                CreateNewsInput::new(format!("Новость {}", index), "Просто текст.")
                    .with_date(today - Duration::days(index)),
            )
            .await
            .expect("Failed to create news");
        }

        let listed = repo.list_recent(10).await.expect("Failed to list");
        assert_eq!(listed.len(), 10);
        assert_eq!(listed[0].title, "Новость 0");

        let dates: Vec<_> = listed.iter().map(|n| n.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted, "news must be ordered newest first");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(CreateNewsInput::new("Заголовок", "Текст"))
            .await
            .expect("create");

        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(repo.get_by_id(created.id).await.expect("query").is_none());
        assert!(!repo.delete(created.id).await.expect("second delete"));
    }
}

//! News service

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::NewsRepository;
use crate::models::{CreateNewsInput, NewsItem};

/// News service
///
/// The public site only reads news; `create` and `delete` serve
/// operators and fixtures.
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    pub fn new(repo: Arc<dyn NewsRepository>) -> Self {
        Self { repo }
    }

    /// Most recent news items, newest first
    pub async fn recent(&self, limit: u32) -> Result<Vec<NewsItem>> {
        self.repo.list_recent(limit as i64).await
    }

    /// Get a news item by ID
    pub async fn get(&self, id: i64) -> Result<Option<NewsItem>> {
        self.repo.get_by_id(id).await
    }

    /// Create a news item
    pub async fn create(&self, input: CreateNewsInput) -> Result<NewsItem> {
        let item = self.repo.create(input).await?;
        tracing::info!(news_id = item.id, title = %item.title, "News item created");
        Ok(item)
    }

    /// Delete a news item and, by cascade, its comments
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repo.delete(id).await
    }
}

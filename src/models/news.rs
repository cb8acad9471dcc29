//! News item model
//!
//! A news item is an article with a title, body text, and publication
//! date. Items are created by operators or fixtures; the public site
//! only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text (plain text, escaped at render time)
    pub text: String,
    /// Publication date, newest items appear first on the home page
    pub date: DateTime<Utc>,
}

/// Input for creating a news item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewsInput {
    pub title: String,
    pub text: String,
    /// Publication date; `None` means "now"
    pub date: Option<DateTime<Utc>>,
}

impl CreateNewsInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            date: None,
        }
    }

    /// Set an explicit publication date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

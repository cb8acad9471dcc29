//! Comment service
//!
//! Create, edit, and delete comments. Edit and delete are gated on
//! authorship: a missing comment and someone else's comment are both
//! reported as `NotFound`, so a caller cannot distinguish "absent"
//! from "not yours".

use std::sync::Arc;

use crate::db::repositories::{CommentRepository, NewsRepository};
use crate::models::{Comment, CommentWithAuthor, CreateCommentInput, User};

/// Error types for comment operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// The comment (or its news item) does not exist, or the caller is
    /// not its author
    #[error("Comment not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    news: Arc<dyn NewsRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, news: Arc<dyn NewsRepository>) -> Self {
        Self { comments, news }
    }

    /// Create a comment on a news item
    ///
    /// # Errors
    ///
    /// `NotFound` if the news item does not exist.
    pub async fn create(
        &self,
        news_id: i64,
        author: &User,
        text: String,
    ) -> Result<Comment, CommentServiceError> {
        if self.news.get_by_id(news_id).await?.is_none() {
            return Err(CommentServiceError::NotFound);
        }

        let comment = self
            .comments
            .create(CreateCommentInput {
                news_id,
                author_id: author.id,
                text,
            })
            .await?;

        tracing::info!(
            comment_id = comment.id,
            news_id,
            author_id = author.id,
            "Comment created"
        );
        Ok(comment)
    }

    /// Load a comment for its author, e.g. to prefill the edit form or
    /// render the deletion confirmation
    ///
    /// # Errors
    ///
    /// `NotFound` if the comment does not exist or `user_id` is not its
    /// author.
    pub async fn get_for_author(
        &self,
        comment_id: i64,
        user_id: i64,
    ) -> Result<Comment, CommentServiceError> {
        let comment = self
            .comments
            .get_by_id(comment_id)
            .await?
            .ok_or(CommentServiceError::NotFound)?;

        if !comment.is_authored_by(user_id) {
            tracing::debug!(comment_id, user_id, "Comment access by non-author rejected");
            return Err(CommentServiceError::NotFound);
        }

        Ok(comment)
    }

    /// Replace a comment's text on behalf of its author
    ///
    /// Returns the updated comment (its `news_id` locates the detail
    /// page to return to).
    pub async fn edit(
        &self,
        comment_id: i64,
        user_id: i64,
        text: String,
    ) -> Result<Comment, CommentServiceError> {
        let mut comment = self.get_for_author(comment_id, user_id).await?;

        self.comments.update_text(comment.id, &text).await?;
        comment.text = text;

        tracing::info!(comment_id, user_id, "Comment edited");
        Ok(comment)
    }

    /// Delete a comment on behalf of its author
    ///
    /// Returns the deleted comment.
    pub async fn delete(
        &self,
        comment_id: i64,
        user_id: i64,
    ) -> Result<Comment, CommentServiceError> {
        let comment = self.get_for_author(comment_id, user_id).await?;

        self.comments.delete(comment.id).await?;

        tracing::info!(comment_id, user_id, "Comment deleted");
        Ok(comment)
    }

    /// Comments on a news item with author usernames, oldest first
    pub async fn list_for_news(
        &self,
        news_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, CommentServiceError> {
        Ok(self.comments.list_for_news(news_id).await?)
    }

    /// Count all comments (used by tests and operators)
    pub async fn count(&self) -> Result<i64, CommentServiceError> {
        Ok(self.comments.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        SqlxCommentRepository, SqlxNewsRepository, SqlxUserRepository, UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::CreateNewsInput;

    struct Fixture {
        service: CommentService,
        news_id: i64,
        author: User,
        other: User,
    }

    async fn setup() -> Fixture {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let news_repo = SqlxNewsRepository::new(pool.clone());
        let news = news_repo
            .create(CreateNewsInput::new("Заголовок", "Текст"))
            .await
            .expect("create news");

        let user_repo = SqlxUserRepository::new(pool.clone());
        let author = user_repo
            .create(&User::new("Автор".to_string(), "hash".to_string()))
            .await
            .expect("create author");
        let other = user_repo
            .create(&User::new("Не автор".to_string(), "hash".to_string()))
            .await
            .expect("create other");

        Fixture {
            service: CommentService::new(
                SqlxCommentRepository::boxed(pool.clone()),
                SqlxNewsRepository::boxed(pool),
            ),
            news_id: news.id,
            author,
            other,
        }
    }

    #[tokio::test]
    async fn test_create_comment() {
        let f = setup().await;

        let comment = f
            .service
            .create(f.news_id, &f.author, "Текст комментария".to_string())
            .await
            .expect("create");

        assert_eq!(comment.news_id, f.news_id);
        assert_eq!(comment.author_id, f.author.id);
        assert_eq!(f.service.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_create_on_missing_news_is_not_found() {
        let f = setup().await;

        let result = f
            .service
            .create(999, &f.author, "Текст".to_string())
            .await;
        assert!(matches!(result, Err(CommentServiceError::NotFound)));
        assert_eq!(f.service.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_author_can_edit() {
        let f = setup().await;
        let comment = f
            .service
            .create(f.news_id, &f.author, "Текст комментария".to_string())
            .await
            .expect("create");

        let edited = f
            .service
            .edit(comment.id, f.author.id, "Новый текст".to_string())
            .await
            .expect("edit");

        assert_eq!(edited.text, "Новый текст");
        assert_eq!(edited.news_id, f.news_id);
        assert_eq!(edited.author_id, f.author.id);
    }

    #[tokio::test]
    async fn test_non_author_edit_is_not_found_and_leaves_text() {
        let f = setup().await;
        let comment = f
            .service
            .create(f.news_id, &f.author, "Текст комментария".to_string())
            .await
            .expect("create");

        let result = f
            .service
            .edit(comment.id, f.other.id, "Новый текст".to_string())
            .await;
        assert!(matches!(result, Err(CommentServiceError::NotFound)));

        let unchanged = f
            .service
            .get_for_author(comment.id, f.author.id)
            .await
            .expect("author still sees it");
        assert_eq!(unchanged.text, "Текст комментария");
    }

    #[tokio::test]
    async fn test_author_can_delete() {
        let f = setup().await;
        let comment = f
            .service
            .create(f.news_id, &f.author, "Текст комментария".to_string())
            .await
            .expect("create");

        let deleted = f
            .service
            .delete(comment.id, f.author.id)
            .await
            .expect("delete");
        assert_eq!(deleted.news_id, f.news_id);
        assert_eq!(f.service.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_non_author_delete_is_not_found_and_keeps_comment() {
        let f = setup().await;
        let comment = f
            .service
            .create(f.news_id, &f.author, "Текст комментария".to_string())
            .await
            .expect("create");

        let result = f.service.delete(comment.id, f.other.id).await;
        assert!(matches!(result, Err(CommentServiceError::NotFound)));
        assert_eq!(f.service.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_missing_comment_and_foreign_comment_look_the_same() {
        let f = setup().await;
        let comment = f
            .service
            .create(f.news_id, &f.author, "Текст комментария".to_string())
            .await
            .expect("create");

        let missing = f.service.get_for_author(999, f.other.id).await;
        let foreign = f.service.get_for_author(comment.id, f.other.id).await;

        // Both collapse to the same error so existence doesn't leak.
        assert!(matches!(missing, Err(CommentServiceError::NotFound)));
        assert!(matches!(foreign, Err(CommentServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_for_news() {
        let f = setup().await;
        for index in 0..2 {
            f.service
                .create(f.news_id, &f.author, format!("Комментарий {}", index))
                .await
                .expect("create");
        }

        let listed = f.service.list_for_news(f.news_id).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].author_username, "Автор");
    }
}

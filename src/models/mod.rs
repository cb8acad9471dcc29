//! Data models
//!
//! This module contains all data structures used throughout vestnik.
//! Models represent:
//! - Database entities (NewsItem, Comment, User, Session)
//! - Input types for creating entities
//! - Display types joining related rows for rendering

mod comment;
mod news;
mod session;
mod user;

pub use comment::{Comment, CommentWithAuthor, CreateCommentInput};
pub use news::{CreateNewsInput, NewsItem};
pub use session::Session;
pub use user::User;

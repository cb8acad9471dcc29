//! Comment pages
//!
//! - GET/POST /comments/{id}/edit   - edit a comment's text
//! - GET/POST /comments/{id}/delete - confirm and delete a comment
//!
//! All routes sit behind `require_auth`. A comment that does not exist
//! and a comment that belongs to someone else both produce a 404.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::models::{Comment, User};
use crate::web::error::PageError;
use crate::web::middleware::{AppState, AuthenticatedUser};
use crate::web::news::CommentForm;
use crate::web::util::{base_context, comments_url, redirect, render_page};

/// GET /comments/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<Response, PageError> {
    let comment = state
        .comment_service
        .get_for_author(comment_id, user.id)
        .await?;

    render_edit(&state, &user, &comment, &comment.text, None)
}

/// POST /comments/{id}/edit
pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Form(form): Form<CommentForm>,
) -> Result<Response, PageError> {
    let comment = state
        .comment_service
        .get_for_author(comment_id, user.id)
        .await?;

    let text = form.text;
    if text.trim().is_empty() {
        return render_edit(
            &state,
            &user,
            &comment,
            &text,
            Some("Comment text is required."),
        );
    }

    if let Err(warning) = state.word_filter.validate(&text) {
        return render_edit(&state, &user, &comment, &text, Some(&warning));
    }

    let updated = state
        .comment_service
        .edit(comment.id, user.id, text)
        .await?;

    Ok(redirect(&comments_url(updated.news_id)))
}

/// GET /comments/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<Response, PageError> {
    let comment = state
        .comment_service
        .get_for_author(comment_id, user.id)
        .await?;

    let mut context = base_context(&state, Some(&user));
    context.insert("comment", &comment);

    Ok(render_page(&state, "comment_delete.html", &context)?.into_response())
}

/// POST /comments/{id}/delete
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<Response, PageError> {
    let deleted = state.comment_service.delete(comment_id, user.id).await?;

    Ok(redirect(&comments_url(deleted.news_id)))
}

fn render_edit(
    state: &AppState,
    user: &User,
    comment: &Comment,
    form_text: &str,
    form_error: Option<&str>,
) -> Result<Response, PageError> {
    let mut context = base_context(state, Some(user));
    context.insert("comment", comment);
    context.insert("form_text", form_text);
    context.insert("form_error", &form_error);

    Ok(render_page(state, "comment_edit.html", &context)?.into_response())
}

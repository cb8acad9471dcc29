//! News pages
//!
//! - GET  /           - home page, most recent news
//! - GET  /news/{id}  - news detail with comments and the comment form
//! - POST /news/{id}  - create a comment on the news item

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::models::{NewsItem, User};
use crate::web::error::PageError;
use crate::web::middleware::{login_url_with_next, AppState, AuthenticatedUser};
use crate::web::util::{base_context, comments_url, news_detail_url, redirect, render_page};

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

/// GET /
pub async fn home(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Response, PageError> {
    let news = state
        .news_service
        .recent(state.site.news_per_page)
        .await?;

    let mut context = base_context(&state, user.as_ref().map(|u| &u.0 .0));
    context.insert("news", &news);

    Ok(render_page(&state, "home.html", &context)?.into_response())
}

/// GET /news/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Response, PageError> {
    let news = state
        .news_service
        .get(news_id)
        .await?
        .ok_or(PageError::NotFound)?;

    render_detail(&state, &news, user.as_ref().map(|u| &u.0 .0), "", None).await
}

/// POST /news/{id}
///
/// Anonymous requests are redirected to the login page and nothing is
/// persisted. Text containing a forbidden word redisplays the page with
/// the configured warning on the form. On success the browser is sent
/// back to the comments section of the detail page.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
    user: Option<Extension<AuthenticatedUser>>,
    Form(form): Form<CommentForm>,
) -> Result<Response, PageError> {
    let Some(Extension(AuthenticatedUser(user))) = user else {
        return Ok(redirect(&login_url_with_next(&news_detail_url(news_id))));
    };

    let news = state
        .news_service
        .get(news_id)
        .await?
        .ok_or(PageError::NotFound)?;

    let text = form.text;
    if text.trim().is_empty() {
        return render_detail(
            &state,
            &news,
            Some(&user),
            &text,
            Some("Comment text is required."),
        )
        .await;
    }

    if let Err(warning) = state.word_filter.validate(&text) {
        return render_detail(&state, &news, Some(&user), &text, Some(&warning)).await;
    }

    state.comment_service.create(news.id, &user, text).await?;

    Ok(redirect(&comments_url(news.id)))
}

/// Render the detail page, optionally with a form error
async fn render_detail(
    state: &AppState,
    news: &NewsItem,
    user: Option<&User>,
    form_text: &str,
    form_error: Option<&str>,
) -> Result<Response, PageError> {
    let comments = state.comment_service.list_for_news(news.id).await?;

    let mut context = base_context(state, user);
    context.insert("news", news);
    context.insert("comments", &comments);
    context.insert("form_text", form_text);
    context.insert("form_error", &form_error);

    Ok(render_page(state, "detail.html", &context)?.into_response())
}

//! Shared handler helpers

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tera::Context as TeraContext;

use crate::models::User;
use crate::web::error::PageError;
use crate::web::middleware::AppState;

/// A plain 302 Found redirect
///
/// Success and login redirects are 302 (the classic form-post
/// contract); axum's `Redirect::to` would emit 303.
pub fn redirect(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// URL of a news detail page
pub fn news_detail_url(news_id: i64) -> String {
    format!("/news/{}", news_id)
}

/// URL of a news detail page, scrolled to the comments section
pub fn comments_url(news_id: i64) -> String {
    format!("/news/{}#comments", news_id)
}

/// Template context preloaded with the fields every page expects
pub fn base_context(state: &AppState, user: Option<&User>) -> TeraContext {
    let mut context = TeraContext::new();
    context.insert("site_title", &state.site.title);
    context.insert("user", &user);
    context
}

/// Render a template to an HTML response
pub fn render_page(
    state: &AppState,
    template: &str,
    context: &TeraContext,
) -> Result<Html<String>, PageError> {
    Ok(Html(state.templates.render(template, context)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(news_detail_url(7), "/news/7");
        assert_eq!(comments_url(7), "/news/7#comments");
    }

    #[test]
    fn test_redirect_is_302() {
        let response = redirect("/news/1#comments");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/news/1#comments"
        );
    }
}

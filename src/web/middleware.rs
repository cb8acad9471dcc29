//! Web middleware
//!
//! Contains:
//! - Shared application state
//! - Session-cookie extraction
//! - Authentication middleware: `require_auth` redirects anonymous
//!   requests to the login page with a `next` parameter pointing back
//!   at the original URL; `optional_auth` only attaches the user when
//!   a valid session cookie is present.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::models::User;
use crate::services::{CommentService, NewsService, UserService, WordFilter};
use crate::web::error::PageError;
use crate::web::templates::TemplateEngine;
use crate::web::util::redirect;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub news_service: Arc<NewsService>,
    pub comment_service: Arc<CommentService>,
    pub word_filter: Arc<WordFilter>,
    pub templates: Arc<TemplateEngine>,
    pub site: Arc<SiteConfig>,
}

/// Authenticated user extracted from the session cookie
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Extract the session token from the request's cookies
pub fn extract_session_token(request: &Request) -> Option<String> {
    let cookie_header = request.headers().get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            if name == SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Build the login URL carrying the original URL in `next`
pub fn login_url_with_next(next: &str) -> String {
    format!("/auth/login?next={}", urlencoding::encode(next))
}

fn original_url(request: &Request) -> &str {
    request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| request.uri().path())
}

/// Authentication middleware
///
/// Anonymous or expired-session requests are redirected to the login
/// page rather than rejected; the mutation they attempted never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_session_token(&request) else {
        return redirect(&login_url_with_next(original_url(&request)));
    };

    match state.user_service.validate_session(&token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Ok(None) => redirect(&login_url_with_next(original_url(&request))),
        Err(err) => PageError::from(err).into_response(),
    }
}

/// Optional authentication middleware
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(&request) {
        if let Ok(Some(user)) = state.user_service.validate_session(&token).await {
            request.extensions_mut().insert(AuthenticatedUser(user));
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_cookie(cookie: &str) -> Request {
        Request::builder()
            .uri("/news/1")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn test_extract_session_token() {
        let request = request_with_cookie("session=abc123");
        assert_eq!(extract_session_token(&request), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_session_token_among_other_cookies() {
        let request = request_with_cookie("theme=dark; session=abc123; lang=ru");
        assert_eq!(extract_session_token(&request), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_session_token_missing() {
        let request = request_with_cookie("theme=dark");
        assert_eq!(extract_session_token(&request), None);
    }

    #[test]
    fn test_login_url_with_next_encodes_the_target() {
        assert_eq!(
            login_url_with_next("/news/1"),
            "/auth/login?next=%2Fnews%2F1"
        );
    }
}

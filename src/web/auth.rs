//! Authentication pages
//!
//! - GET  /auth/login  - login form (accepts a `next` query parameter)
//! - POST /auth/login  - verify credentials, set the session cookie
//! - POST /auth/logout - clear the session, back to the home page

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::services::{LoginInput, UserServiceError};
use crate::web::error::PageError;
use crate::web::middleware::{extract_session_token, AppState, AuthenticatedUser, SESSION_COOKIE};
use crate::web::util::{base_context, redirect, render_page};

/// Session cookie lifetime, matching the server-side session expiry
const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// Only follow redirect targets inside this site
fn safe_next(next: Option<String>) -> String {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") => n,
        _ => "/".to_string(),
    }
}

/// GET /auth/login
pub async fn login_form(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, PageError> {
    let mut context = base_context(&state, None);
    context.insert("next", &safe_next(query.next));
    context.insert("error", &Option::<String>::None);
    context.insert("username", "");

    Ok(render_page(&state, "login.html", &context)?.into_response())
}

/// POST /auth/login
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let next = safe_next(form.next);

    match state
        .user_service
        .login(LoginInput::new(&form.username, &form.password))
        .await
    {
        Ok(session) => {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
                SESSION_COOKIE, session.id, SESSION_COOKIE_MAX_AGE_SECS
            );

            let mut response = redirect(&next);
            response
                .headers_mut()
                .insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
            Ok(response)
        }
        Err(UserServiceError::AuthenticationError(message)) => {
            // Wrong credentials redisplay the form, keeping the target.
            let mut context = base_context(&state, None);
            context.insert("next", &next);
            context.insert("error", &Some(message));
            context.insert("username", &form.username);

            Ok(render_page(&state, "login.html", &context)?.into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    request: Request,
) -> Result<Response, PageError> {
    if let Some(token) = extract_session_token(&request) {
        state.user_service.logout(&token).await?;
        tracing::debug!(user_id = user.id, "User logged out");
    }

    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
    let mut response = redirect("/");
    response
        .headers_mut()
        .insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    Ok(response)
}

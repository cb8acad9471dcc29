//! Web layer - HTTP handlers and routing
//!
//! Server-rendered pages:
//! - Home listing and news detail (with comments)
//! - Comment creation on the detail URL, edit and delete pages
//! - Login and logout
//!
//! Mutating comment routes sit behind authentication; anonymous
//! requests are redirected to the login page with a `next` parameter.

pub mod auth;
pub mod comments;
pub mod error;
pub mod middleware;
pub mod news;
pub mod templates;
pub mod util;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::PageError;
pub use middleware::{AppState, AuthenticatedUser};
pub use templates::TemplateEngine;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Author-only comment pages and logout require a valid session.
    let protected = Router::new()
        .route(
            "/comments/{id}/edit",
            get(comments::edit_form).post(comments::update_comment),
        )
        .route(
            "/comments/{id}/delete",
            get(comments::delete_form).post(comments::delete_comment),
        )
        .route("/auth/logout", post(auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Public pages attach the user when a session cookie is present;
    // comment creation rejects anonymous posters itself so it can
    // point `next` back at the detail URL.
    let public = Router::new()
        .route("/", get(news::home))
        .route("/news/{id}", get(news::detail).post(news::create_comment))
        .route(
            "/auth/login",
            get(auth::login_form).post(auth::login_submit),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::optional_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

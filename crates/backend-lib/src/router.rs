// ============================
// socialconnect-backend/src/router.rs
// ============================
//! HTTP router.
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const LOGOUT_PATH: &str = "/logout";

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HOME_PATH, get(handlers::home))
        .route(
            LOGIN_PATH,
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route(
            REGISTER_PATH,
            get(handlers::register_form).post(handlers::register_submit),
        )
        .route(LOGOUT_PATH, get(handlers::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Login, registration, landing and logout handlers.
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use socialconnect_common::{LoginForm, Notice, RegisterForm};
use std::sync::Arc;

use super::cookies::{
    flash_cookie, pending_notices, removal_cookie, session_cookie, AuthenticatedUser,
    CookieHeaders, SessionCookie, FLASH_COOKIE,
};
use super::pages;
use crate::error::AppError;
use crate::router::{HOME_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::AppState;

/// Render a page, consuming any flash notices the request carried
fn page(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    render: impl FnOnce(&[Notice]) -> String,
    extra: &[Notice],
) -> Response {
    let mut notices = pending_notices(headers);
    let had_flash = !notices.is_empty();
    notices.extend_from_slice(extra);

    let mut cookies = CookieHeaders::new();
    if had_flash {
        cookies.push((
            header::SET_COOKIE,
            removal_cookie(FLASH_COOKIE, state.settings.cookie_secure),
        ));
    }
    (status, AppendHeaders(cookies), Html(render(&notices))).into_response()
}

/// Redirect after queueing a notice for the next page
fn redirect_with(state: &AppState, headers: &HeaderMap, to: &str, notice: Notice, mut cookies: CookieHeaders) -> Response {
    cookies.push((
        header::SET_COOKIE,
        flash_cookie(headers, notice, state.settings.cookie_secure),
    ));
    (AppendHeaders(cookies), Redirect::to(to)).into_response()
}

/// Landing page, only reachable with a live session
pub async fn home(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(username): AuthenticatedUser,
    headers: HeaderMap,
) -> Response {
    page(&state, &headers, StatusCode::OK, |n| pages::home_page(&username, n), &[])
}

pub async fn login_form(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    page(&state, &headers, StatusCode::OK, pages::login_page, &[])
}

/// Verify the submitted credentials and start a session
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    SessionCookie(previous): SessionCookie,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth.authenticate(form.username, form.password).await {
        Ok(token) => {
            // a fresh login never keeps riding on an older token
            if let Some(previous) = previous {
                state.auth.logout(&previous);
            }
            let cookies = vec![(header::SET_COOKIE, session_cookie(&state.settings, &token))];
            Ok(redirect_with(&state, &headers, HOME_PATH, Notice::LoginSuccess, cookies))
        },
        Err(AppError::InvalidCredentials) => Ok(page(
            &state,
            &headers,
            StatusCode::UNAUTHORIZED,
            pages::login_page,
            &[Notice::InvalidCredentials],
        )),
        Err(e) => Err(e),
    }
}

pub async fn register_form(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    page(&state, &headers, StatusCode::OK, pages::register_page, &[])
}

/// Create an account, then send the user to the login form
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let (notice, target) = match state
        .auth
        .register(form.username, form.password, form.email)
        .await
    {
        Ok(()) => (Notice::Registered, LOGIN_PATH),
        Err(AppError::AlreadyExists) => (Notice::UsernameTaken, REGISTER_PATH),
        Err(AppError::InvalidInput(_)) => (Notice::InvalidInput, REGISTER_PATH),
        Err(e) => return Err(e),
    };
    Ok(redirect_with(&state, &headers, target, notice, CookieHeaders::new()))
}

/// End the session, whether or not one was active
pub async fn logout(
    State(state): State<Arc<AppState>>,
    SessionCookie(token): SessionCookie,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = token {
        state.auth.logout(&token);
    }
    let cookies = vec![(
        header::SET_COOKIE,
        removal_cookie(&state.settings.cookie_name, state.settings.cookie_secure),
    )];
    redirect_with(&state, &headers, LOGIN_PATH, Notice::LoggedOut, cookies)
}

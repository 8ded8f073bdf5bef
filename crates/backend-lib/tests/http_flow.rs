//! Drives the router the way a browser would.
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use socialconnect_backend::{
    auth::{ManualClock, MIN_LOG_N},
    config::Settings,
    router::create_router,
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_settings() -> Settings {
    Settings {
        hash_log_n: MIN_LOG_N,
        ..Settings::default()
    }
}

fn app() -> Router {
    create_router(Arc::new(AppState::new(test_settings()).unwrap()))
}

fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` part of the Set-Cookie header for `name`
fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&format!("{name}=")))
        .map(|c| c.split(';').next().unwrap().to_string())
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const ALICE: &str = "username=alice&email=a%40x.com&password=Secret123%21";
const ALICE_LOGIN: &str = "username=alice&password=Secret123%21";

async fn register_and_login(app: &Router) -> String {
    let response = app.clone().oneshot(form("/register", ALICE, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(form("/login", ALICE_LOGIN, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    cookie_pair(&response, "session").unwrap()
}

#[tokio::test]
async fn test_home_requires_session() {
    let response = app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app()
        .oneshot(get("/", Some("session=forged")))
        .await
        .unwrap();
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_register_redirects_to_login_with_notice() {
    let app = app();
    let response = app.clone().oneshot(form("/register", ALICE, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let flash = cookie_pair(&response, "flash").unwrap();
    assert_eq!(flash, "flash=registered");

    let response = app.oneshot(get("/login", Some(&flash))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // the notice is shown once and then cleared
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("flash=;") && c.contains("Max-Age=0")));
    let body = body_text(response).await;
    assert!(body.contains("Registration successful! Please login."));
}

#[tokio::test]
async fn test_duplicate_registration() {
    let app = app();
    app.clone().oneshot(form("/register", ALICE, None)).await.unwrap();

    let response = app
        .clone()
        .oneshot(form(
            "/register",
            "username=alice&email=other%40y.org&password=another",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/register");
    assert_eq!(
        cookie_pair(&response, "flash").as_deref(),
        Some("flash=username_taken")
    );

    // the original password still works
    let response = app.oneshot(form("/login", ALICE_LOGIN, None)).await.unwrap();
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_empty_username_is_rejected() {
    let response = app()
        .oneshot(form("/register", "username=&email=&password=pw", None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/register");
    assert_eq!(
        cookie_pair(&response, "flash").as_deref(),
        Some("flash=invalid_input")
    );
}

#[tokio::test]
async fn test_login_and_landing_page() {
    let app = app();
    let session = register_and_login(&app).await;

    let response = app.oneshot(get("/", Some(&session))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Welcome to SocialConnect, alice!"));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let app = app();
    app.clone().oneshot(form("/register", ALICE, None)).await.unwrap();
    let response = app.oneshot(form("/login", ALICE_LOGIN, None)).await.unwrap();

    let cookie = set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("session="))
        .unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));
    assert_eq!(
        cookie_pair(&response, "flash").as_deref(),
        Some("flash=login_success")
    );
}

#[tokio::test]
async fn test_bad_logins_are_indistinguishable() {
    let app = app();
    app.clone().oneshot(form("/register", ALICE, None)).await.unwrap();

    let wrong_password = app
        .clone()
        .oneshot(form("/login", "username=alice&password=wrong", None))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(form("/login", "username=bob&password=Secret123%21", None))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert!(cookie_pair(&wrong_password, "session").is_none());

    let wrong_password = body_text(wrong_password).await;
    let unknown_user = body_text(unknown_user).await;
    assert!(wrong_password.contains("Invalid username or password"));
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = app();
    let session = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(get("/logout", Some(&session)))
        .await
        .unwrap();
    assert_eq!(location(&response), "/login");
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("session=;") && c.contains("Max-Age=0")));
    assert_eq!(
        cookie_pair(&response, "flash").as_deref(),
        Some("flash=logged_out")
    );

    // replaying the old cookie does not help
    let response = app.oneshot(get("/", Some(&session))).await.unwrap();
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let response = app().oneshot(get("/logout", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_relogin_replaces_previous_session() {
    let app = app();
    let first = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(form("/login", ALICE_LOGIN, Some(&first)))
        .await
        .unwrap();
    let second = cookie_pair(&response, "session").unwrap();
    assert_ne!(first, second);

    let response = app.clone().oneshot(get("/", Some(&first))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = app.oneshot(get("/", Some(&second))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_expires_after_ttl() {
    let clock = ManualClock::default();
    let state = AppState::with_clock(test_settings(), Arc::new(clock.clone())).unwrap();
    let app = create_router(Arc::new(state));
    let session = register_and_login(&app).await;

    clock.advance(Duration::from_secs(60 * 60 * 24 * 7 - 1));
    let response = app.clone().oneshot(get("/", Some(&session))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    clock.advance(Duration::from_secs(1));
    let response = app.oneshot(get("/", Some(&session))).await.unwrap();
    assert_eq!(location(&response), "/login");
}

//! End-to-end checks of the authentication core, without HTTP.
use socialconnect_backend::auth::{
    verify_password, Authenticator, CredentialStore, ManualClock, PasswordHasher, SessionManager,
    MIN_LOG_N, SESSION_TTL,
};
use socialconnect_backend::error::AppError;
use std::sync::Arc;
use std::time::Duration;

fn setup() -> (Authenticator, ManualClock) {
    let clock = ManualClock::default();
    let store = Arc::new(CredentialStore::in_memory(
        PasswordHasher::new(MIN_LOG_N).unwrap(),
    ));
    let sessions = SessionManager::with_clock(Arc::new(clock.clone()), SESSION_TTL);
    (Authenticator::new(store, sessions), clock)
}

#[test]
fn test_register_login_logout_scenario() {
    let (auth, _clock) = setup();

    auth.store().register("alice", "Secret123!", "a@x.com").unwrap();

    let token = auth.authenticate("alice", "Secret123!").unwrap();
    assert_eq!(auth.current_user(&token).as_deref(), Some("alice"));

    assert!(matches!(
        auth.authenticate("alice", "wrong"),
        Err(AppError::InvalidCredentials)
    ));

    auth.invalidate(&token);
    assert_eq!(auth.current_user(&token), None);
}

#[test]
fn test_second_registration_leaves_record_unchanged() {
    let (auth, _clock) = setup();
    auth.store().register("alice", "Secret123!", "a@x.com").unwrap();
    let before = auth.store().lookup("alice").unwrap();

    assert!(matches!(
        auth.store().register("alice", "p2", "e2"),
        Err(AppError::AlreadyExists)
    ));

    let after = auth.store().lookup("alice").unwrap();
    assert_eq!(before, after);
    assert!(verify_password(&after.password_hash, "Secret123!"));
    assert!(!verify_password(&after.password_hash, "p2"));
    assert!(auth.authenticate("alice", "p2").is_err());
}

#[test]
fn test_failures_look_the_same() {
    let (auth, _clock) = setup();
    auth.store().register("alice", "Secret123!", "a@x.com").unwrap();

    let unknown = auth.authenticate("nobody", "Secret123!").unwrap_err();
    let wrong = auth.authenticate("alice", "Secret123?").unwrap_err();

    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(unknown.error_code(), wrong.error_code());
}

#[test]
fn test_every_login_gets_its_own_session() {
    let (auth, clock) = setup();
    auth.store().register("alice", "Secret123!", "a@x.com").unwrap();

    let first = auth.authenticate("alice", "Secret123!").unwrap();
    clock.advance(Duration::from_secs(60 * 60 * 24 * 3));
    let second = auth.authenticate("alice", "Secret123!").unwrap();

    // the first session expires on its own schedule
    clock.advance(Duration::from_secs(60 * 60 * 24 * 4));
    assert_eq!(auth.current_user(&first), None);
    assert_eq!(auth.current_user(&second).as_deref(), Some("alice"));

    auth.invalidate(&first);
    assert_eq!(auth.current_user(&second).as_deref(), Some("alice"));
}

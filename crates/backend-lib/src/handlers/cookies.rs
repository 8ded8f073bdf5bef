//! Cookie transport for session tokens and flash notices.
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderName},
};
use socialconnect_common::Notice;
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppError;
use crate::AppState;

/// Cookie carrying pending one-time notices
pub const FLASH_COOKIE: &str = "flash";

/// Separator between notice codes inside the flash cookie
const FLASH_SEPARATOR: &str = ".";

/// Value of the first cookie called `name`, across all `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

fn cookie_attributes(max_age: u64, secure: bool) -> String {
    let mut attrs = format!("; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        attrs.push_str("; Secure");
    }
    attrs
}

/// `Set-Cookie` value handing a session token to the client
pub fn session_cookie(settings: &Settings, token: &str) -> String {
    format!(
        "{}={}{}",
        settings.cookie_name,
        token,
        cookie_attributes(settings.session_ttl_secs, settings.cookie_secure)
    )
}

/// `Set-Cookie` value that makes the client drop a cookie
pub fn removal_cookie(name: &str, secure: bool) -> String {
    format!("{name}={}", cookie_attributes(0, secure))
}

/// Notices waiting in the request's flash cookie. Unknown codes are skipped.
pub fn pending_notices(headers: &HeaderMap) -> Vec<Notice> {
    read_cookie(headers, FLASH_COOKIE)
        .map(|raw| {
            raw.split(FLASH_SEPARATOR)
                .filter_map(Notice::from_code)
                .collect()
        })
        .unwrap_or_default()
}

/// `Set-Cookie` value queueing `notice` after whatever is already pending
pub fn flash_cookie(headers: &HeaderMap, notice: Notice, secure: bool) -> String {
    let mut notices = pending_notices(headers);
    notices.push(notice);
    let codes: Vec<&str> = notices.iter().map(|n| n.code()).collect();
    // flash notices only need to survive a single redirect
    format!(
        "{FLASH_COOKIE}={}{}",
        codes.join(FLASH_SEPARATOR),
        cookie_attributes(60, secure)
    )
}

/// Headers to attach to a response
pub type CookieHeaders = Vec<(HeaderName, String)>;

/// Session token presented by the client, if any
#[derive(Debug, Clone)]
pub struct SessionCookie(pub Option<String>);

impl FromRequestParts<Arc<AppState>> for SessionCookie {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(SessionCookie(read_cookie(
            &parts.headers,
            &state.settings.cookie_name,
        )))
    }
}

/// Username of a live session; rejects with a redirect to the login page
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        read_cookie(&parts.headers, &state.settings.cookie_name)
            .and_then(|token| state.auth.current_user(&token))
            .map(AuthenticatedUser)
            .ok_or(AppError::SessionAbsent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_read_cookie() {
        let headers = headers(&["theme=dark; session=abc123", "other=1"]);
        assert_eq!(read_cookie(&headers, "session").as_deref(), Some("abc123"));
        assert_eq!(read_cookie(&headers, "other").as_deref(), Some("1"));
        assert_eq!(read_cookie(&headers, "sess"), None);
        assert_eq!(read_cookie(&HeaderMap::new(), "session"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let mut settings = Settings::default();
        let cookie = session_cookie(&settings, "tok");
        assert_eq!(
            cookie,
            "session=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800"
        );

        settings.cookie_secure = true;
        assert!(session_cookie(&settings, "tok").ends_with("; Secure"));
        assert!(removal_cookie("session", false).contains("Max-Age=0"));
    }

    #[test]
    fn test_flash_round_trip() {
        let empty = HeaderMap::new();
        let set = flash_cookie(&empty, Notice::LoggedOut, false);
        assert!(set.starts_with("flash=logged_out;"));

        let next = headers(&["flash=logged_out"]);
        assert_eq!(pending_notices(&next), vec![Notice::LoggedOut]);

        let queued = flash_cookie(&next, Notice::Registered, false);
        assert!(queued.starts_with("flash=logged_out.registered;"));
    }

    #[test]
    fn test_unknown_flash_codes_are_ignored() {
        let headers = headers(&["flash=<b>hi</b>.registered"]);
        assert_eq!(pending_notices(&headers), vec![Notice::Registered]);
    }
}

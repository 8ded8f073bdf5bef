// ================
// common/src/lib.rs
// ================
//! Common types shared between the `SocialConnect` web layer and its callers.
//! This module defines the submitted form payloads and the one-time notices
//! shown after a redirect.

use serde::Deserialize;
use std::fmt;

/// Stand-in printed instead of a plaintext password
const REDACTED: &str = "[redacted]";

/// Payload of the registration form
#[derive(Deserialize, Clone)]
pub struct RegisterForm {
    /// Requested username, must not already exist
    pub username: String,
    /// Free-form email address, stored as given
    pub email: String,
    /// Plaintext password, hashed before it is stored
    pub password: String,
}

/// Payload of the login form
#[derive(Deserialize, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Visual category of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    Success,
    Error,
    Info,
}

impl NoticeCategory {
    /// CSS class used when rendering the notice
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeCategory::Success => "success",
            NoticeCategory::Error => "error",
            NoticeCategory::Info => "info",
        }
    }
}

/// One-time notice carried across a redirect.
///
/// Notices travel as a short code rather than free text so the cookie that
/// carries them never holds user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginSuccess,
    InvalidCredentials,
    UsernameTaken,
    Registered,
    LoggedOut,
    InvalidInput,
}

impl Notice {
    /// Every notice, in code order
    pub const ALL: [Notice; 6] = [
        Notice::LoginSuccess,
        Notice::InvalidCredentials,
        Notice::UsernameTaken,
        Notice::Registered,
        Notice::LoggedOut,
        Notice::InvalidInput,
    ];

    /// Stable short code used on the wire
    pub fn code(self) -> &'static str {
        match self {
            Notice::LoginSuccess => "login_success",
            Notice::InvalidCredentials => "invalid_credentials",
            Notice::UsernameTaken => "username_taken",
            Notice::Registered => "registered",
            Notice::LoggedOut => "logged_out",
            Notice::InvalidInput => "invalid_input",
        }
    }

    /// Parse a short code, unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.code() == code)
    }

    pub fn category(self) -> NoticeCategory {
        match self {
            Notice::LoginSuccess | Notice::Registered => NoticeCategory::Success,
            Notice::LoggedOut => NoticeCategory::Info,
            Notice::InvalidCredentials | Notice::UsernameTaken | Notice::InvalidInput => {
                NoticeCategory::Error
            },
        }
    }

    /// Human readable text of the notice
    pub fn message(self) -> &'static str {
        match self {
            Notice::LoginSuccess => "Login successful!",
            Notice::InvalidCredentials => "Invalid username or password",
            Notice::UsernameTaken => "Username already exists",
            Notice::Registered => "Registration successful! Please login.",
            Notice::LoggedOut => "You have been logged out",
            Notice::InvalidInput => "Username and password must not be empty",
        }
    }
}

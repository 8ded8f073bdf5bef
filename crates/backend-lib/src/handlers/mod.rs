//! HTTP handlers for the `SocialConnect` pages.

pub mod auth;
pub mod cookies;
pub mod pages;

pub use auth::{home, login_form, login_submit, logout, register_form, register_submit};

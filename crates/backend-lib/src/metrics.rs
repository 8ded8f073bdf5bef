// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTER: &str = "auth.register";
pub const AUTH_LOGIN_SUCCESS: &str = "auth.login.success";
pub const AUTH_LOGIN_FAILURE: &str = "auth.login.failure";
pub const AUTH_LOGOUT: &str = "auth.logout";
pub const SESSION_ISSUED: &str = "auth.session.issued";
pub const SESSION_EXPIRED: &str = "auth.session.expired";
pub const SESSION_ACTIVE: &str = "auth.session.active";

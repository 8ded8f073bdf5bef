//! HTML for the login, registration and landing pages.
use socialconnect_common::Notice;

use crate::router::{LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; background: #f0f2f5; margin: 0;
       display: flex; justify-content: center; align-items: center; height: 100vh; }
.container { background: #fff; border-radius: 8px; padding: 20px; width: 350px;
             box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1); }
h1 { text-align: center; color: #1877f2; }
label { display: block; margin-bottom: 5px; font-weight: bold; }
input { width: 100%; padding: 10px; margin-bottom: 15px; box-sizing: border-box;
        border: 1px solid #dddfe2; border-radius: 5px; font-size: 16px; }
button { width: 100%; padding: 10px; border: none; border-radius: 5px;
         color: #fff; background: #1877f2; font-size: 16px; cursor: pointer; }
.alt { text-align: center; margin-top: 15px; }
.notice { padding: 10px; border-radius: 5px; margin-bottom: 10px; }
.notice.error { background: #ffebee; color: #c62828; }
.notice.success { background: #e8f5e9; color: #2e7d32; }
.notice.info { background: #e3f2fd; color: #1565c0; }
"#;

/// Escape text for use inside HTML element content or quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            format!(
                r#"<div class="notice {}">{}</div>"#,
                n.category().as_str(),
                escape_html(n.message())
            )
        })
        .collect()
}

fn layout(title: &str, notices: &[Notice], body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>SocialConnect - {title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
{notices}
{body}
</div>
</body>
</html>
"#,
        title = escape_html(title),
        notices = render_notices(notices),
    )
}

pub fn login_page(notices: &[Notice]) -> String {
    let body = format!(
        r#"<h1>SocialConnect</h1>
<form method="POST" action="{LOGIN_PATH}">
<label for="username">Username</label>
<input type="text" id="username" name="username" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">Login</button>
</form>
<div class="alt">Don't have an account? <a href="{REGISTER_PATH}">Register here</a></div>"#
    );
    layout("Login", notices, &body)
}

pub fn register_page(notices: &[Notice]) -> String {
    let body = format!(
        r#"<h1>Create Account</h1>
<form method="POST" action="{REGISTER_PATH}">
<label for="username">Username</label>
<input type="text" id="username" name="username" required>
<label for="email">Email</label>
<input type="email" id="email" name="email" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">Register</button>
</form>
<div class="alt">Already have an account? <a href="{LOGIN_PATH}">Login here</a></div>"#
    );
    layout("Register", notices, &body)
}

pub fn home_page(username: &str, notices: &[Notice]) -> String {
    let body = format!(
        r#"<h1>Welcome to SocialConnect, {}!</h1>
<p>You are logged in.</p>
<a href="{LOGOUT_PATH}">Logout</a>"#,
        escape_html(username)
    );
    layout("Home", notices, &body)
}

//! Input validation and sanitization utilities

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Maximum length of names and usernames
pub const MAX_NAME_LEN: usize = 64;
/// Maximum length of passwords, descriptions and comments
pub const MAX_TEXT_LEN: usize = 254;
/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 3;

/// A validation failure on a single request field
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Collects field errors across a request body
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a field check
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.errors.push(FieldError { field, message });
        }
        self
    }

    /// Finish validation, returning every collected error
    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

fn check_length(value: &str, label: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();

    if len < min {
        return Err(if min == 1 {
            format!("{} is required", label)
        } else {
            format!("{} must be at least {} characters long", label, min)
        });
    }

    if len > max {
        return Err(format!("{} must be at most {} characters long", label, max));
    }

    Ok(())
}

/// Validate a display name (users and events)
pub fn validate_name(name: &str) -> Result<(), String> {
    check_length(name.trim(), "Name", 1, MAX_NAME_LEN)
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    check_length(username.trim(), "Username", 1, MAX_NAME_LEN)
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    check_length(password, "Password", MIN_PASSWORD_LEN, MAX_TEXT_LEN)
}

/// Validate an event description. Empty is allowed.
pub fn validate_description(description: &str) -> Result<(), String> {
    check_length(description, "Description", 0, MAX_TEXT_LEN)
}

/// Validate a registration comment. Empty is allowed.
pub fn validate_comment(comment: &str) -> Result<(), String> {
    check_length(comment, "Comment", 0, MAX_TEXT_LEN)
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());

    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Drop script blocks, `javascript:` URLs and inline event handlers,
/// leaving the remaining text unescaped
pub fn strip_markup(s: &str) -> String {
    static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();
    static HANDLER_REGEX: OnceLock<Regex> = OnceLock::new();
    static JS_URL_REGEX: OnceLock<Regex> = OnceLock::new();

    let script = SCRIPT_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?(</script\s*>|$)").expect("Failed to compile script regex")
    });
    let handler = HANDLER_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)\bon[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
            .expect("Failed to compile event handler regex")
    });
    let js_url = JS_URL_REGEX
        .get_or_init(|| Regex::new(r"(?i)javascript\s*:").expect("Failed to compile url regex"));

    let without_scripts = script.replace_all(s, "");
    let without_handlers = handler.replace_all(&without_scripts, "");
    js_url.replace_all(&without_handlers, "").into_owned()
}

/// Neutralize script injection in free text.
///
/// Markup is stripped with [`strip_markup`], then whatever remains is
/// escaped. Escaping lengthens the text, so length limits apply to the
/// returned value.
pub fn sanitize_text(s: &str) -> String {
    html_escape(&strip_markup(s))
}

/// Sanitize a single-line identifier such as a name or username
pub fn sanitize_name(s: &str) -> String {
    sanitize_text(s.trim())
}

//! Input sanitization and validation helpers.
//!
//! Free text coming from users is passed through [`sanitize_text`] before it is stored so
//! that markup never reaches other users verbatim. The remaining helpers validate
//! identifiers and return `AppError::BadRequest` with a message naming the field.

use regex::Regex;
use std::sync::LazyLock;

use crate::server::error::AppError;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>").unwrap_or_else(|e| panic!("invalid tag regex: {e}"))
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("invalid email regex: {e}"))
});

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{3}$").unwrap_or_else(|e| panic!("invalid currency regex: {e}")));

/// Strips HTML tags and control characters, keeping newlines and tabs, then trims.
pub fn sanitize_text(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, "");

    without_tags
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitizes `input` and checks its length in characters.
///
/// # Returns
/// - `Ok(String)` - The sanitized value
/// - `Err(AppError::BadRequest)` - Sanitized value is shorter than `min` or longer than `max`
pub fn require_text(field: &str, input: &str, min: usize, max: usize) -> Result<String, AppError> {
    let value = sanitize_text(input);
    let len = value.chars().count();

    if len < min || len > max {
        return Err(AppError::BadRequest(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }

    Ok(value)
}

pub fn validate_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Lowercases the name and joins alphanumeric runs with single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Normalizes a three letter ISO currency code to lowercase.
///
/// # Returns
/// - `Ok(String)` - Lowercase code, `usd` when none was given
/// - `Err(AppError::BadRequest)` - Not three ASCII letters
pub fn validate_currency(currency: Option<&str>) -> Result<String, AppError> {
    let Some(currency) = currency else {
        return Ok("usd".to_string());
    };

    let normalized = currency.trim().to_ascii_lowercase();
    if !CURRENCY_RE.is_match(&normalized) {
        return Err(AppError::BadRequest(format!(
            "Invalid currency code '{}'",
            currency
        )));
    }

    Ok(normalized)
}

/// Restricts a filename to `[A-Za-z0-9._-]`, replacing other characters with `_`.
///
/// Leading dots are dropped so the result can never be `.` or `..`.
pub fn sanitize_filename(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    replaced.trim_start_matches('.').to_string()
}

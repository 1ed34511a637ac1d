//! Field rules for catalog inputs.
//!
//! Each function checks one field and reports the first rule it breaks.
//! Messages are lower-case fragments so callers can prefix them with the
//! referencing entity (`"website domain is not valid"`).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const LANGUAGE_IETF_MAX: usize = 12;
pub const LANGUAGE_NAME_MAX: usize = 24;
pub const WEBSITE_DOMAIN_MAX: usize = 32;
pub const WEBSITE_NAME_MAX: usize = 48;
pub const LINK_RELATIVE_URL_MAX: usize = 128;
pub const COMIC_CODE_LENGTH: usize = 8;
pub const CHAPTER_CHAPTER_MAX: usize = 64;
pub const CHAPTER_VERSION_MAX: usize = 32;

/// Hostname syntax: dot separated labels of 1-63 alphanumerics or inner
/// hyphens, at least two labels, alphabetic TLD.
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid(msg: impl Into<String>) -> CoreError {
    CoreError::Validation(msg.into())
}

fn non_empty_within(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(invalid(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max {
        return Err(invalid(format!(
            "{field} must be at most {max} characters long"
        )));
    }
    Ok(())
}

/// Prefix a validation message with the referencing entity, leaving other
/// errors untouched.
pub fn prefixed<T>(prefix: &str, result: Result<T, CoreError>) -> Result<T, CoreError> {
    result.map_err(|e| match e {
        CoreError::Validation(msg) => CoreError::Validation(format!("{prefix} {msg}")),
        other => other,
    })
}

/// Apply `check` only when the optional field is present.
pub fn optional<T: ?Sized>(
    value: Option<&T>,
    check: impl FnOnce(&T) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    value.map_or(Ok(()), check)
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

pub fn validate_ietf(ietf: &str) -> Result<(), CoreError> {
    non_empty_within("ietf", ietf, LANGUAGE_IETF_MAX)
}

pub fn validate_language_name(name: &str) -> Result<(), CoreError> {
    non_empty_within("name", name, LANGUAGE_NAME_MAX)
}

pub fn validate_domain(domain: &str) -> Result<(), CoreError> {
    non_empty_within("domain", domain, WEBSITE_DOMAIN_MAX)?;
    if !DOMAIN_RE.is_match(domain) {
        return Err(invalid("domain is not valid"));
    }
    Ok(())
}

pub fn validate_website_name(name: &str) -> Result<(), CoreError> {
    non_empty_within("name", name, WEBSITE_NAME_MAX)
}

pub fn validate_relative_url(relative_url: &str) -> Result<(), CoreError> {
    non_empty_within("relative url", relative_url, LINK_RELATIVE_URL_MAX)
}

pub fn validate_comic_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(invalid("code cannot be empty"));
    }
    if code.chars().count() != COMIC_CODE_LENGTH {
        return Err(invalid(format!(
            "code must be {COMIC_CODE_LENGTH} characters long"
        )));
    }
    Ok(())
}

pub fn validate_chapter(chapter: &str) -> Result<(), CoreError> {
    non_empty_within("chapter", chapter, CHAPTER_CHAPTER_MAX)
}

pub fn validate_version(version: &str) -> Result<(), CoreError> {
    non_empty_within("version", version, CHAPTER_VERSION_MAX)
}

/// Every requested SET NULL column must be in `allowed`.
pub fn validate_set_null(requested: &[String], allowed: &[&str]) -> Result<(), CoreError> {
    match requested.iter().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(invalid(format!("set null {key} is not recognized"))),
        None => Ok(()),
    }
}

/// Reject a missing selector on creation, e.g. `"either comic id or comic code must exist"`.
pub fn require_ref<T>(value: Option<&T>, message: &str) -> Result<(), CoreError> {
    match value {
        Some(_) => Ok(()),
        None => Err(invalid(message)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn message(result: Result<(), CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn comic_code_must_be_exactly_eight() {
        assert!(validate_comic_code("ABCD1234").is_ok());
        assert_eq!(
            message(validate_comic_code("short")),
            "code must be 8 characters long"
        );
        assert_eq!(message(validate_comic_code("")), "code cannot be empty");
    }

    #[test]
    fn ietf_length_is_bounded() {
        assert!(validate_ietf("en-US").is_ok());
        assert_eq!(
            message(validate_ietf("en-US-x-private")),
            "ietf must be at most 12 characters long"
        );
    }

    #[test]
    fn domain_syntax_is_checked() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain("sub.example-site.co").is_ok());
        assert_eq!(message(validate_domain("not a domain")), "domain is not valid");
        assert_eq!(message(validate_domain("-bad.com")), "domain is not valid");
        assert_eq!(message(validate_domain("localhost")), "domain is not valid");
    }

    #[test]
    fn domain_length_checked_before_syntax() {
        let long = format!("{}.com", "a".repeat(40));
        assert_eq!(
            message(validate_domain(&long)),
            "domain must be at most 32 characters long"
        );
    }

    #[test]
    fn prefix_applies_to_validation_only() {
        assert_eq!(
            message(prefixed("website", validate_domain("nope"))),
            "website domain is not valid"
        );
        let forbidden = prefixed::<()>("website", Err(CoreError::Forbidden("x".into())));
        assert_matches!(forbidden, Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn set_null_rejects_unknown_columns() {
        assert!(validate_set_null(&["machine_tl".into()], &["machine_tl"]).is_ok());
        assert_eq!(
            message(validate_set_null(&["name".into()], &["machine_tl"])),
            "set null name is not recognized"
        );
    }

    #[test]
    fn optional_skips_absent_fields() {
        assert!(optional(None::<&str>, validate_chapter).is_ok());
        assert!(optional(Some(""), validate_chapter).is_err());
    }
}

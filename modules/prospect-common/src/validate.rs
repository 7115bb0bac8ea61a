//! Field-level invariants for extracted records.
//!
//! The extractor trusts the model for free-text fields but not for the two
//! fields with syntax: a LinkedIn URL must parse as an absolute http(s) URL
//! and an email must look like an email. Anything else is downgraded to the
//! sentinel rather than rejecting the record.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::types::NOT_FOUND;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Keep a LinkedIn URL only when it parses as an absolute http(s) URL.
pub fn normalize_linkedin_url(value: String) -> String {
    if value == NOT_FOUND {
        return value;
    }
    match Url::parse(&value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => value,
        _ => NOT_FOUND.to_string(),
    }
}

/// Keep an email only when it is syntactically plausible.
pub fn normalize_email(value: String) -> String {
    if value == NOT_FOUND || EMAIL_RE.is_match(&value) {
        value
    } else {
        NOT_FOUND.to_string()
    }
}

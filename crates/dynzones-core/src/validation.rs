//! Client-side syntax checks for policy rule fields
//!
//! These are usability gates run before a rule is submitted. The API does
//! its own authoritative validation, so nothing here is a security boundary.
//!
//! - [`is_valid_zone_pattern`]: zone name that may contain the `%u` user placeholder
//! - [`is_valid_dns_name`]: concrete zone SOA name
//! - [`is_valid_user_filter`]: `alice@example.com`, `*@example.com` or `*suffix@example.com`
//!
//! Each boolean check has a `check_*` counterpart that reports which rule
//! failed.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::NameError;

/// Maximum total length of a name
pub const MAX_NAME_LEN: usize = 253;

/// Maximum length of a single label
pub const MAX_LABEL_LEN: usize = 63;

/// Placeholder standing in for the user name in a zone pattern
pub const USER_PLACEHOLDER: &str = "%u";

/// Label character substituted for [`USER_PLACEHOLDER`] before checking
const PLACEHOLDER_SUBSTITUTE: &str = "A";

static USER_FILTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*[a-zA-Z0-9._-]*|[a-zA-Z0-9._-]+)@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Returns `true` if `value` is a valid zone pattern.
///
/// Every `%u` is replaced by a single letter and the result must pass the
/// same label rules as [`is_valid_dns_name`]. Where `%u` sits is not
/// constrained beyond that, so `users.%u` is accepted.
pub fn is_valid_zone_pattern(value: &str) -> bool {
    check_zone_pattern(value).is_ok()
}

/// Returns `true` if `value` is a concrete DNS name (no placeholder).
pub fn is_valid_dns_name(value: &str) -> bool {
    check_dns_name(value).is_ok()
}

/// Returns `true` if `value` is an email address or a wildcard email pattern.
pub fn is_valid_user_filter(value: &str) -> bool {
    check_user_filter(value).is_ok()
}

/// Validate a zone pattern, reporting the first rule it breaks
pub fn check_zone_pattern(value: &str) -> Result<(), NameError> {
    if value.is_empty() {
        return Err(NameError::Empty);
    }

    let substituted = value.replace(USER_PLACEHOLDER, PLACEHOLDER_SUBSTITUTE);
    check_labels(substituted.trim())
}

/// Validate a concrete DNS name, reporting the first rule it breaks
pub fn check_dns_name(value: &str) -> Result<(), NameError> {
    check_labels(value.trim())
}

/// Validate a user filter
pub fn check_user_filter(value: &str) -> Result<(), NameError> {
    if value.is_empty() {
        return Err(NameError::Empty);
    }

    if USER_FILTER_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(NameError::UserFilter(value.to_string()))
    }
}

/// Label rules shared by zone patterns and DNS names. `name` is already trimmed.
fn check_labels(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong(name.len()));
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return Err(NameError::TooFewLabels(labels.len()));
    }

    for label in labels {
        check_label(label)?;
    }

    Ok(())
}

fn check_label(label: &str) -> Result<(), NameError> {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return Err(NameError::LabelLength(label.to_string()));
    }

    if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(NameError::InvalidCharacter(label.to_string()));
    }

    // Only ASCII remains at this point, so byte indexing is safe.
    let bytes = label.as_bytes();
    if !bytes[0].is_ascii_alphanumeric() || !bytes[bytes.len() - 1].is_ascii_alphanumeric() {
        return Err(NameError::HyphenAtBoundary(label.to_string()));
    }

    Ok(())
}

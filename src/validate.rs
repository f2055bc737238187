//! Input validation for identifiers, pagination, and URLs.
//!
//! Every validator runs before any network call and fails with a
//! validation-kind [`PermaError`]. Facade methods taking typed integers
//! need no runtime check; the string validators here are public for
//! callers holding untyped input (CLI arguments, config files).

use url::Url;

use crate::error::{PermaError, Result};
use crate::pagination::Pagination;

/// Validate an archive GUID: two groups of four uppercase alphanumeric
/// characters separated by a hyphen, e.g. `ABCD-1234`.
///
/// Case-sensitive; lowercase input is rejected rather than normalized.
pub fn archive_guid(guid: &str) -> Result<&str> {
    let bytes = guid.as_bytes();
    let well_formed = bytes.len() == 9
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_uppercase() || b.is_ascii_digit());

    if well_formed {
        Ok(guid)
    } else {
        Err(PermaError::InvalidArchiveGuid(guid.to_string()))
    }
}

/// Coerce a folder id from string input.
pub fn folder_id(value: &str) -> Result<i64> {
    numeric_id("folder", value)
}

/// Coerce an organization id from string input.
pub fn organization_id(value: &str) -> Result<i64> {
    numeric_id("organization", value)
}

/// Coerce a batch id from string input.
pub fn batch_id(value: &str) -> Result<i64> {
    numeric_id("batch", value)
}

fn numeric_id(kind: &'static str, value: &str) -> Result<i64> {
    leading_integer(value).ok_or_else(|| PermaError::InvalidNumericId {
        kind,
        value: value.to_string(),
    })
}

/// Parse the leading integer prefix of a string: `"12.5"` yields 12,
/// `"FOO"` yields nothing.
///
/// This deliberately mirrors `parseInt` coercion so that callers who
/// relied on truncating input like `"12.5"` keep working. See DESIGN.md
/// for why the looseness is preserved rather than tightened.
fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first()? {
        b'-' => (-1, &trimmed[1..]),
        b'+' => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Validate a pagination window. `limit` must be at least 1; `offset >= 0`
/// is enforced by the type.
pub fn pagination(pagination: &Pagination) -> Result<()> {
    if pagination.limit < 1 {
        return Err(PermaError::InvalidPagination(format!(
            "limit must be >= 1, got {}",
            pagination.limit
        )));
    }
    Ok(())
}

/// Validate that a URL to capture is well-formed and absolute.
pub fn capture_url(url: &str) -> Result<&str> {
    Url::parse(url).map_err(|_| PermaError::InvalidUrl(url.to_string()))?;
    Ok(url)
}

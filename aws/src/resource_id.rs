//! Composite resource identifiers
//!
//! Terraform stores a single string ID per resource. Resources keyed by more
//! than one value join the parts with a fixed separator.

use crate::error::{ProviderError, Result};

pub const OBJECT_LAMBDA_ACCESS_POINT_ID_SEPARATOR: &str = ":";
pub const THESAURUS_ID_SEPARATOR: &str = "/";

pub fn create_resource_id(parts: &[&str], separator: &str) -> String {
    parts.join(separator)
}

/// Split `id` into exactly `expected_parts` non-empty parts. `format`
/// describes the expected shape in the error message.
pub fn parse_resource_id(
    id: &str,
    separator: &str,
    expected_parts: usize,
    format: &str,
) -> Result<Vec<String>> {
    let parts: Vec<&str> = id.split(separator).collect();

    if parts.len() != expected_parts || parts.iter().any(|p| p.is_empty()) {
        return Err(ProviderError::MalformedIdentifier {
            id: id.to_string(),
            expected: format.to_string(),
        });
    }

    Ok(parts.into_iter().map(str::to_string).collect())
}

pub fn object_lambda_access_point_create_resource_id(account_id: &str, name: &str) -> String {
    create_resource_id(&[account_id, name], OBJECT_LAMBDA_ACCESS_POINT_ID_SEPARATOR)
}

/// Returns `(account_id, name)`
pub fn object_lambda_access_point_parse_resource_id(id: &str) -> Result<(String, String)> {
    let format = format!(
        "account-id{}access-point-name",
        OBJECT_LAMBDA_ACCESS_POINT_ID_SEPARATOR
    );
    let mut parts =
        parse_resource_id(id, OBJECT_LAMBDA_ACCESS_POINT_ID_SEPARATOR, 2, &format)?.into_iter();

    match (parts.next(), parts.next()) {
        (Some(account_id), Some(name)) => Ok((account_id, name)),
        _ => Err(ProviderError::MalformedIdentifier {
            id: id.to_string(),
            expected: format,
        }),
    }
}

pub fn thesaurus_create_resource_id(thesaurus_id: &str, index_id: &str) -> String {
    create_resource_id(&[thesaurus_id, index_id], THESAURUS_ID_SEPARATOR)
}

/// Returns `(thesaurus_id, index_id)`
pub fn thesaurus_parse_resource_id(id: &str) -> Result<(String, String)> {
    let format = format!("thesaurus-id{}index-id", THESAURUS_ID_SEPARATOR);
    let mut parts = parse_resource_id(id, THESAURUS_ID_SEPARATOR, 2, &format)?.into_iter();

    match (parts.next(), parts.next()) {
        (Some(thesaurus_id), Some(index_id)) => Ok((thesaurus_id, index_id)),
        _ => Err(ProviderError::MalformedIdentifier {
            id: id.to_string(),
            expected: format,
        }),
    }
}

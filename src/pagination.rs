//! Link-header pagination.
//!
//! Freshservice signals another page of a collection with a `link` response
//! header whose value carries the next URI between `<` and `>`. A response
//! without the header is the last page.

use reqwest::header::HeaderMap;

use crate::error::FreshError;

/// Name of the header that carries the next-page URI.
pub const LINK_HEADER: &str = "link";

/// Extracts the next-page URI from a response's headers.
///
/// Returns `Ok(None)` when there is no `link` header. When the header is
/// present, the substring strictly between the first `<` and the first `>`
/// is returned without further validation.
///
/// # Errors
///
/// Returns `FreshError::InvalidLinkHeader` when the header is present but is
/// not valid text or does not contain a `<...>` pair.
pub fn next_page_link(headers: &HeaderMap) -> Result<Option<String>, FreshError> {
    let Some(value) = headers.get(LINK_HEADER) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| FreshError::InvalidLinkHeader {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;

    extract_uri(value)
        .map(|uri| Some(uri.to_string()))
        .ok_or_else(|| FreshError::InvalidLinkHeader {
            value: value.to_string(),
        })
}

fn extract_uri(value: &str) -> Option<&str> {
    let start = value.find('<')?;
    let end = value.find('>')?;
    if end <= start {
        return None;
    }
    Some(&value[start + 1..end])
}

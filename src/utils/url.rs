//! Helpers for building backend endpoint URLs.

use reqwest::Url;

/// Strip trailing slashes so endpoints can be appended without doubling them.
///
/// ```
/// use spur_chat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:4000/api/"), "http://localhost:4000/api");
/// assert_eq!(normalize_base_url("http://localhost:4000/api"), "http://localhost:4000/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Append `segments` to a base URL's path. Each segment is percent-encoded,
/// so ids containing `/`, `?` or spaces stay a single path segment.
///
/// ```
/// use spur_chat::utils::url::construct_api_url;
///
/// let url = construct_api_url("http://localhost:4000/api/", &["threads", "a b", "messages"])
///     .unwrap();
/// assert_eq!(url.as_str(), "http://localhost:4000/api/threads/a%20b/messages");
/// ```
pub fn construct_api_url(base_url: &str, segments: &[&str]) -> Result<Url, String> {
    let normalized_base = normalize_base_url(base_url);
    let mut url = Url::parse(&normalized_base)
        .map_err(|err| format!("Invalid URL '{normalized_base}': {err}"))?;
    url.path_segments_mut()
        .map_err(|()| format!("Base URL '{normalized_base}' cannot take a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Check that a user-supplied base URL is an absolute http(s) URL and return
/// it without trailing slashes.
pub fn validate_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|err| format!("Invalid URL '{trimmed}': {err}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(normalize_base_url(trimmed)),
        other => Err(format!(
            "Unsupported URL scheme '{other}' (expected http or https)"
        )),
    }
}

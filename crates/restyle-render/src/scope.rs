//! Host scoping for the generated document.

use url::Url;

/// Placeholder emitted when the target URL cannot yield a usable host.
pub const PLACEHOLDER_HOST: &str = "unknown-host";

/// Reduce a target URL to a bare host identifier that is always safe to
/// embed in the document's scoping syntax.
///
/// Anything that is not an http(s) URL with a parseable host (file URLs,
/// local paths, missing schemes) degrades to [`PLACEHOLDER_HOST`] rather
/// than emitting unparseable scoping text.
#[must_use]
pub fn sanitized_host(target: &str) -> String {
    let Ok(parsed) = Url::parse(target.trim()) else {
        return PLACEHOLDER_HOST.to_string();
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return PLACEHOLDER_HOST.to_string();
    }
    let Some(host) = parsed.host_str() else {
        return PLACEHOLDER_HOST.to_string();
    };
    let cleaned: String = host
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-')
        .collect::<String>()
        .to_lowercase();
    if cleaned.is_empty() || !cleaned.contains(|ch: char| ch.is_ascii_alphanumeric()) {
        PLACEHOLDER_HOST.to_string()
    } else {
        cleaned
    }
}

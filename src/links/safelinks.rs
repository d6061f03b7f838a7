//! Unwrapping of Outlook Safe Links redirector URLs.
//!
//! Outlook's link protection rewrites every link in a message to
//! `https://<region>.safelinks.protection.outlook.com/?url=<original>&data=...`.
//! The original destination is the form-encoded `url` query parameter.

use tracing::debug;
use url::form_urlencoded;

/// Host fragment identifying a Safe Links wrapper.
pub const SAFELINKS_DOMAIN: &str = "safelinks.protection.outlook.com";

/// Query parameter that carries the original destination.
const URL_PARAM: &str = "url";

/// Whether `url` was rewritten by the Safe Links redirector.
pub fn is_safelink(url: &str) -> bool {
    url.contains(SAFELINKS_DOMAIN)
}

/// Extract the original destination from a Safe Links wrapper.
///
/// Returns the first non-empty `url` query parameter, form-decoded
/// (`+` becomes a space, percent escapes are resolved). Nested redirectors
/// are not followed.
pub fn original_url(safelink: &str) -> Option<String> {
    let query = query_string(safelink)?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == URL_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Resolve one candidate URL.
///
/// Safe Links wrappers are replaced by their destination, or dropped when
/// they carry none. Every other URL is returned unchanged.
pub fn resolve(candidate: &str) -> Option<String> {
    if !is_safelink(candidate) {
        return Some(candidate.to_string());
    }

    let resolved = original_url(candidate);
    match &resolved {
        Some(destination) => debug!(destination = %destination, "Unwrapped safe link"),
        None => debug!(url = candidate, "Safe link without destination, dropped"),
    }
    resolved
}

/// The query component: after the first `?`, before any `#`.
///
/// Split by hand rather than through `Url::parse`, since scanned candidates
/// may carry characters a strict parser rejects.
fn query_string(url: &str) -> Option<&str> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.split_once('?').map(|(_, query)| query)
}

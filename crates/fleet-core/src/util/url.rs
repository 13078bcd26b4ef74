//! Helpers for building redirect targets.

/// Percent-encodes a value for use inside a query string.
///
/// Unreserved characters and `/` are kept as-is, so `/drivers/?page=2`
/// becomes `/drivers/%3Fpage%3D2`.
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(char::from(byte));
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Builds `{login_url}?next={path}` for redirecting anonymous visitors.
#[must_use]
pub fn login_redirect(login_url: &str, next: &str) -> String {
    format!(
        "{login_url}?{}={}",
        crate::constants::REDIRECT_FIELD_NAME,
        encode_query_value(next)
    )
}

/// ## Summary
/// Accepts a post-login destination only if it stays on this site.
///
/// Absolute URLs and scheme-relative `//host` targets are rejected.
#[must_use]
pub fn safe_redirect_target(next: Option<&str>) -> Option<&str> {
    next.filter(|target| {
        target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
    })
}

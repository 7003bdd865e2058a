//! Response normalization.
//!
//! Reduces a raw response to a comparable, size-bounded canonical byte
//! sequence: status line, whitelisted headers in a fixed order, and an
//! optional truncated body. Two normalizations of byte-identical responses
//! with the same flag produce byte-identical output.

use reqwest::header::HeaderMap;

/// Cap on body bytes kept in a snapshot (3MB).
pub const RESPONSE_BODY_LIMIT: usize = 1024 * 1024 * 3;

/// Headers included in the stored snapshot, in emission order.
///
/// The whitelist bounds the comparable surface to change-relevant,
/// low-noise fields. Emission follows this order, not response order.
const HEADER_WHITELIST: &[&str] = &[
    "Host",
    "Content-Length",
    "Content-Type",
    "Location",
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Expose-Headers",
    "Access-Control-Allow-Credentials",
    "Allow",
    "Content-Security-Policy",
    "Proxy-Authenticate",
    "Server",
    "WWW-Authenticate",
    "X-Frame-Options",
    "X-Powered-By",
];

/// Normalize a response into comparable snapshot bytes.
///
/// Emits `"<protocol> <status>\n"`, then `"<name>: <value>\n"` for each
/// whitelisted header that is present and non-empty. Unless `headers_only`,
/// a blank line and up to [`RESPONSE_BODY_LIMIT`] body bytes follow; bytes
/// beyond the cap are dropped silently.
///
/// With `headers_only`, Content-Length is excluded from the whitelist pass:
/// it is body-derived and would flag as changed once the body is dropped.
pub fn normalize(status_line: &str, headers: &HeaderMap, body: &[u8], headers_only: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(256 + if headers_only { 0 } else { body.len().min(RESPONSE_BODY_LIMIT) });

    out.extend_from_slice(status_line.as_bytes());
    out.push(b'\n');

    for name in HEADER_WHITELIST {
        if headers_only && *name == "Content-Length" {
            continue;
        }

        if let Some(value) = headers.get(*name)
            && let Ok(value) = value.to_str()
            && !value.is_empty()
        {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.push(b'\n');
        }
    }

    if !headers_only {
        out.push(b'\n');
        let cap = body.len().min(RESPONSE_BODY_LIMIT);
        out.extend_from_slice(&body[..cap]);
    }

    out
}

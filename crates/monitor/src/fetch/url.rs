//! URL validation for the add operation.
//!
//! The URL string is the endpoint's identifier and is stored exactly as
//! supplied; nothing here rewrites it. Validation only keeps permanently
//! unfetchable rows out of the store.

/// Error type for URL validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Check that a URL parses and uses an http(s) scheme.
pub fn validate(input: &str) -> Result<(), UrlError> {
    if input.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(input).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_https() {
        assert!(validate("https://example.com").is_ok());
    }

    #[test]
    fn test_validate_http() {
        assert!(validate("http://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert!(matches!(validate(""), Err(UrlError::Empty)));
        assert!(matches!(validate("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_validate_unsupported_scheme() {
        assert!(matches!(validate("file:///etc/passwd"), Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_validate_garbage() {
        assert!(matches!(validate("not a url"), Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_does_not_require_lowercase() {
        // The identifier is case-sensitive and stored verbatim.
        assert!(validate("https://EXAMPLE.com/Path").is_ok());
    }
}

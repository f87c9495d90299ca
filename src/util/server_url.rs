use thiserror::Error;
use url::Url;

/// Errors from validating the configured server base URL.
#[derive(Debug, Error)]
pub enum ServerUrlError {
    /// The URL string could not be parsed.
    #[error("Invalid server URL: {0}")]
    Invalid(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("Server URL must include a host")]
    MissingHost,
}

/// Validate a server base URL from config or the command line.
///
/// Only the scheme and host are checked. The bar service normally runs on
/// localhost, so loopback and private addresses are deliberately allowed
/// here — this is the user's own server, not an arbitrary fetch target.
pub fn validate_server_url(raw: &str) -> Result<Url, ServerUrlError> {
    let url = Url::parse(raw.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(ServerUrlError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().is_none() {
        return Err(ServerUrlError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_localhost() {
        let url = validate_server_url("http://127.0.0.1:5000").unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert!(validate_server_url("http://localhost:5000/").is_ok());
    }

    #[test]
    fn test_accepts_https_host() {
        let url = validate_server_url("https://bar.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            validate_server_url("file:///etc/passwd"),
            Err(ServerUrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_server_url("ftp://example.com"),
            Err(ServerUrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validate_server_url("not a url").is_err());
    }

    #[test]
    fn test_trims_whitespace() {
        assert!(validate_server_url("  http://localhost:5000  ").is_ok());
    }
}

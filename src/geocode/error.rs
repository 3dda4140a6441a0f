use reqwest::StatusCode;
use thiserror::Error;

/// Failure below the HTTP layer
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request was cancelled through [`super::GeocodeClient::cancel`].
    #[error("request was cancelled")]
    Cancelled,

    /// Always stored without its URL, which carries the API key.
    #[error(transparent)]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err.without_url())
    }
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Malformed geocoding URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    #[error("Geocoding request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected HTTP response from geocoder: {0}")]
    UnexpectedHttpResponse(StatusCode),
}

impl GeocodeError {
    /// Cancellation is expected whenever a newer search supersedes an older
    /// one, so callers should not report it.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GeocodeError::Transport(TransportError::Cancelled))
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Transport(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cancellation_is_cancelled() {
        assert!(GeocodeError::Transport(TransportError::Cancelled).is_cancelled());
        assert!(!GeocodeError::UnexpectedHttpResponse(StatusCode::BAD_GATEWAY).is_cancelled());

        let parse_err = url::Url::parse("not a url").unwrap_err();
        assert!(!GeocodeError::from(parse_err).is_cancelled());
    }

    #[test]
    fn test_display_includes_status() {
        let err = GeocodeError::UnexpectedHttpResponse(StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("403"));
    }
}

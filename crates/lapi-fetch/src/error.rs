//! Error types for lapi-fetch.

use std::io;

use thiserror::Error;

/// Broad classification of a failed operation.
///
/// Call sites usually only care that a result is absent; the kind is kept for
/// diagnostics through [`crate::Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed URL or HTTP client configuration.
    RequestConstruction,
    /// Connection, protocol or chunk read failure.
    Transfer,
    /// Payload is not UTF-8 or the model builder rejected it.
    Decode,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::RequestConstruction => write!(f, "request construction"),
            ErrorKind::Transfer => write!(f, "transfer"),
            ErrorKind::Decode => write!(f, "decode"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url:    String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("transfer failed: {0}")]
    Transfer(#[from] io::Error),

    #[error("response is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Model(#[from] lapi_model::ModelParseError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl { .. } | Error::ClientBuild(_) => ErrorKind::RequestConstruction,
            Error::Network(_) | Error::Transfer(_) => ErrorKind::Transfer,
            Error::Utf8(_) | Error::Model(_) => ErrorKind::Decode,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let invalid = Error::InvalidUrl {
            url:    "nope".to_string(),
            source: url::Url::parse("nope").unwrap_err(),
        };
        assert_eq!(invalid.kind(), ErrorKind::RequestConstruction);
        assert!(invalid.to_string().starts_with("invalid URL nope"));

        let io_err = Error::from(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert_eq!(io_err.kind(), ErrorKind::Transfer);

        let utf8 = Error::from(String::from_utf8(vec![0xff]).unwrap_err());
        assert_eq!(utf8.kind(), ErrorKind::Decode);

        let model = Error::from(lapi_model::ModelParseError::Empty);
        assert_eq!(model.kind(), ErrorKind::Decode);
    }
}

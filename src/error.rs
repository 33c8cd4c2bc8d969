use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a lookup failed. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The server answered with a non-2xx status.
    #[error("Server Error: {0}")]
    Server(u16),

    /// The request went out but nothing came back.
    #[error("Network Error: No response received")]
    NoResponse,

    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return LookupError::Server(status.as_u16());
        }
        if err.is_connect() || err.is_timeout() {
            return LookupError::NoResponse;
        }
        // a connection dropped before the status line shows up as a bare request error
        if err.is_request() && !err.is_builder() {
            return LookupError::NoResponse;
        }
        LookupError::Other(describe(&err))
    }
}

/// The error and every `source()` below it, joined with `: `.
///
/// reqwest keeps the actual cause (e.g. a URL parse failure) out of its own
/// `Display`, so it has to be pulled from the chain.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("failed to write config file {path}: {source}")]
    ConfigWrite { path: PathBuf, source: io::Error },

    #[error("could not determine platform directories")]
    NoProjectDirs,

    #[error("failed to set up logging: {0}")]
    Logging(String),

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error(transparent)]
    Terminal(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_what_the_user_sees() {
        assert_eq!(LookupError::Server(500).to_string(), "Server Error: 500");
        assert_eq!(
            LookupError::NoResponse.to_string(),
            "Network Error: No response received"
        );
        assert_eq!(
            LookupError::Other("bad body".into()).to_string(),
            "Error: bad body"
        );
    }

    #[test]
    fn builder_error_keeps_its_cause() {
        let err = reqwest::blocking::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let message = LookupError::from(err).to_string();
        assert!(message.starts_with("Error: builder error"), "{message}");
        assert!(message.contains("relative URL without a base"), "{message}");
    }
}

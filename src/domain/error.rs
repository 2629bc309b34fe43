//! # Error Types
//!
//! One enum per seam. Only configuration and initial connection errors are
//! fatal; everything else is recovered at the boundary that must keep running.

use thiserror::Error;

/// Problems with the configuration file or its values. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("station.{0} is not configured")]
    Unset(&'static str),

    #[error("invalid station.{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures talking to the APRS-IS server.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("login rejected: {0}")]
    LoginRejected(String),

    #[error("connection closed by server")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures fetching spots. Never escapes the fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// A raw APRS-IS line that could not be parsed into a packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("missing source/destination header")]
    MissingHeader,

    #[error("empty source callsign")]
    EmptySource,
}

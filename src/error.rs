// src/error.rs

use std::{io, path::PathBuf};

use thiserror::Error;

/// Exit code used by the binaries when an error reaches the top level.
pub const FATAL_EXIT_CODE: i32 = 1;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why the target table could not be pulled out of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no <table border=\"1\" align=\"center\"> element in document")]
    TableNotFound,
    #[error("table does not contain a <tbody> section")]
    MissingBody,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Network failure or timeout while fetching.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client could not be set up (TLS backend, bad options).
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Server answered outside of 2xx.
    #[error("GET {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("filesystem error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] ParseFailure),

    /// Structured cache exists but is not a valid table document.
    #[error("cannot decode cache {}: {source}", .path.display())]
    CacheDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode table: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Short label printed in front of the fatal error line.
    pub fn label(&self) -> &'static str {
        match self {
            Error::Transport { .. } | Error::Status { .. } | Error::Client(_) => {
                "TransportError"
            }
            Error::FileSystem { .. } => "FileSystemError",
            Error::Parse(_) => "ParseError",
            Error::CacheDecode { .. } => "CacheDecodeError",
            Error::Encode(_) => "EncodeError",
            Error::Config(_) => "ConfigError",
        }
    }

    /// Only a corrupt structured cache is recovered from; everything else ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::CacheDecode { .. })
    }
}

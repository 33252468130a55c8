use std::num::ParseIntError;
use std::path::PathBuf;

use hyper::StatusCode;
use jwt_bench_config::Scheme;
use thiserror::Error;

/// Errors raised while reading a results file or rendering its charts.
#[derive(Debug, Error)]
pub enum PlotError {
    /// A results file could not be opened, read or written.
    #[error("failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field is not a base-10 integer.
    #[error("line {line}: {field} field {value:?} is not an integer: {source}")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A row is not valid CSV.
    #[error("line {line}: malformed row: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// A row does not carry exactly three fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A group separator moved past the last configured scheme.
    #[error("line {line}: separator starts group {group}, but only {limit} groups are configured")]
    TooManyGroups {
        line: usize,
        group: usize,
        limit: usize,
    },

    /// A group has fewer records than the charts index.
    #[error("{scheme} has {found} trials, expected at least {expected}")]
    InsufficientTrials {
        scheme: Scheme,
        found: usize,
        expected: usize,
    },

    /// An image could not be drawn or encoded.
    #[error("failed to write {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },
}

/// Errors raised by the token benchmark harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] rsa::Error),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("token verification failed: {0}")]
    Verification(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] hyper::Error),

    #[error("invalid request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("{scheme} request returned {status}")]
    UnexpectedStatus { scheme: Scheme, status: StatusCode },

    #[error("{0} response has no valid generation time")]
    MissingTiming(Scheme),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Dataset(#[from] PlotError),
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;

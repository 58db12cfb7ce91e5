//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading the event tree
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("ROOT error: {0}")]
    Root(String),

    #[error("Missing branch '{0}' in tree")]
    MissingBranch(String),

    #[error("Branch '{name}' has unsupported type '{type_name}'")]
    UnsupportedBranchType { name: String, type_name: String },

    #[error("Branch '{name}' has {found} entries, tree has {expected}")]
    BranchLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid event on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Errors that can occur during aggregation and resolution statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("Event {event}: Q_depoList has {len} entries, expected at least {expected}")]
    ShortDepositionList {
        event: usize,
        len: usize,
        expected: usize,
    },

    #[error("Resolution of an empty distribution is undefined")]
    EmptyDistribution,

    #[error("Resolution is undefined for a distribution with zero mean")]
    ZeroMean,

    #[error("Resolution is undefined for a distribution with non-finite values")]
    NonFinite,
}

/// Errors that can occur during histogram rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No series to draw")]
    EmptySeries,

    #[error("Drawing failed: {0}")]
    Drawing(String),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

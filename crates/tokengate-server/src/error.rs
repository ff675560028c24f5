//! Host error type.

use std::{io, path::PathBuf};

use thiserror::Error;
use tokengate_core::TableError;
use tokengate_proto::TokenParseError;

/// Errors from loading inputs or running a subcommand.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Report could not be written.
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    /// Token file line is not a valid token.
    #[error("line {line}: {source}")]
    InvalidToken {
        /// 1-based line number
        line: usize,
        /// Parse failure
        #[source]
        source: TokenParseError,
    },

    /// Token file holds more tokens than the table can.
    #[error("line {line}: {source}")]
    TableFull {
        /// 1-based line number of the first token that did not fit
        line: usize,
        /// Table error
        #[source]
        source: TableError,
    },

    /// Frame file line is not valid hex.
    #[error("line {line}: invalid frame hex: {source}")]
    InvalidFrame {
        /// 1-based line number
        line: usize,
        /// Decode failure
        #[source]
        source: hex::FromHexError,
    },

    /// `--frame` argument is not valid hex.
    #[error("invalid --frame hex: {0}")]
    FrameArg(#[source] hex::FromHexError),

    /// Subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

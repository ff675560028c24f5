//! Host tooling for the Tokengate filter
//!
//! The filter core decides on one frame at a time and has no notion of files,
//! logging or a control plane. This crate is the thin host around it: it
//! loads authorized tokens into a [`tokengate_core::SharedTable`], feeds
//! captured frames through the filter, and reports verdicts and counters.
//!
//! # Components
//!
//! - [`cli`]: Command line definition
//! - [`loader`]: Token and frame file parsing
//! - [`replay`]: Running frames through the filter, optionally on several
//!   threads
//! - [`runner`]: Subcommand execution and logging setup
//! - [`error`]: Host error type

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod error;
pub mod loader;
pub mod replay;
pub mod runner;

pub use cli::{Cli, Command};
pub use error::ServerError;
pub use runner::{init_tracing, run};

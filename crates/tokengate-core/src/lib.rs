//! Tokengate decision core
//!
//! Combines the token located by `tokengate-proto` with an authorization
//! table into a Pass/Drop decision for a single frame. The decision is a pure
//! function of the frame bytes and the table contents at call time; nothing
//! is retained between calls.
//!
//! # Architecture
//!
//! The table is injected rather than global. [`Filter`] is generic over any
//! [`AuthorizationTable`], so production hosts hand it a [`SharedTable`]
//! that a control plane updates concurrently, while tests hand it a plain
//! `HashSet<Token>`.
//!
//! The filter is fail-open: a frame that is not IPv4/TCP, is malformed, or
//! carries no `Authorization:` prefix in its scan window is passed. Only a
//! frame that presents a token the table does not contain is dropped.
//!
//! # Components
//!
//! - [`table`]: Authorization table trait, fixed-capacity set, shared handle
//! - [`decision`]: Decision and verdict types, scan-result combinator
//! - [`filter`]: The per-frame pipeline
//! - [`stats`]: Host-owned outcome counters

pub mod decision;
pub mod filter;
pub mod stats;
pub mod table;

pub use decision::{Decision, Verdict, VerdictReason};
pub use filter::{Filter, FilterConfig, decide};
pub use stats::{FilterStats, StatsSnapshot};
pub use table::{AuthorizationTable, SharedTable, TableError, TokenTable};
pub use tokengate_proto::{SkipReason, Token};

//! Wire layer for the Tokengate authorization filter.
//!
//! Inspects a raw Ethernet frame, walks the IPv4 and TCP headers, and looks
//! for an `Authorization:` prefix followed by a fixed 16-byte token inside the
//! first bytes of the TCP payload. Everything here is a pure function of the
//! frame bytes; the authorization table and the Pass/Drop decision live in
//! `tokengate-core`.
//!
//! The pipeline, leaf first:
//!
//! ```text
//! FrameView ──> walker::walk ──> scan::scan ──> token::extract ──> TokenMatch
//!    │               │               │
//!    └── has() ──────┴── SkipReason ─┘   (every failed gate means "pass")
//! ```
//!
//! # Security
//!
//! Frames are untrusted input. Every read goes through [`FrameView`], which
//! proves `offset + len <= frame.len()` before handing out bytes, and header
//! layouts are verified at compile time via `zerocopy`. Scanning is capped at
//! [`constants::MAX_SCAN_LEN`] bytes regardless of payload size, so the
//! per-frame cost is bounded.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod errors;
pub mod headers;
pub mod locate;
pub mod scan;
pub mod token;
pub mod view;
pub mod walker;

pub use errors::{SkipReason, TokenParseError};
pub use headers::{EthernetHeader, Ipv4Header, TcpHeader};
pub use locate::{TokenMatch, locate};
pub use scan::{ScanConfig, ScanOutcome, ScanWindow};
pub use token::Token;
pub use view::FrameView;
pub use walker::ParsedHeaders;

//! Reference model of the filter.
//!
//! Written for obviousness, not speed: plain slice indexing after explicit
//! length checks, and the prefix search as a `windows()` scan over the capped
//! payload. It shares constants with the real pipeline but none of its code,
//! so a disagreement between the two points at a bug in one of them.

use std::collections::HashSet;

use tokengate_core::Decision;
use tokengate_proto::{
    Token,
    constants::{AUTH_PREFIX, MAX_SCAN_LEN, PREFIX_LEN, TOKEN_LEN},
};

/// Naive filter over a set of authorized tokens.
#[derive(Debug, Clone)]
pub struct ModelFilter {
    tokens: HashSet<Token>,
    max_scan_len: usize,
}

impl Default for ModelFilter {
    /// Empty table, full scan window.
    fn default() -> Self {
        Self::new([])
    }
}

impl ModelFilter {
    /// Model authorizing exactly `tokens`, default scan window.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self { tokens: tokens.into_iter().collect(), max_scan_len: MAX_SCAN_LEN }
    }

    /// Use a smaller scan window.
    pub fn with_max_scan_len(mut self, max_scan_len: usize) -> Self {
        self.max_scan_len = max_scan_len.min(MAX_SCAN_LEN);
        self
    }

    /// Authorized tokens.
    pub fn tokens(&self) -> &HashSet<Token> {
        &self.tokens
    }

    /// Decide on `frame`.
    pub fn decide(&self, frame: &[u8]) -> Decision {
        match self.token_in(frame) {
            Some(token) if !self.tokens.contains(&token) => Decision::Drop,
            _ => Decision::Pass,
        }
    }

    /// The token `frame` presents, if any.
    pub fn token_in(&self, frame: &[u8]) -> Option<Token> {
        let payload = Self::payload(frame)?;
        let window = &payload[..payload.len().min(self.max_scan_len)];

        let needed = PREFIX_LEN + TOKEN_LEN;
        if window.len() < needed {
            return None;
        }
        let last = window.len() - needed;

        let at = window.windows(PREFIX_LEN).take(last + 1).position(|w| w == AUTH_PREFIX)?;
        let mut token = [0u8; TOKEN_LEN];
        token.copy_from_slice(&window[at + PREFIX_LEN..at + needed]);
        Some(Token::new(token))
    }

    fn payload(frame: &[u8]) -> Option<&[u8]> {
        if frame.len() < 14 || frame[12] != 0x08 || frame[13] != 0x00 {
            return None;
        }
        if frame.len() < 14 + 20 {
            return None;
        }

        let ihl = usize::from(frame[14] & 0x0F);
        if frame[14 + 9] != 6 || ihl < 5 || frame.len() < 14 + ihl * 4 {
            return None;
        }

        let tcp = 14 + ihl * 4;
        if frame.len() < tcp + 20 {
            return None;
        }
        let doff = usize::from(frame[tcp + 12] >> 4);
        if doff < 5 || frame.len() < tcp + doff * 4 {
            return None;
        }

        let payload = &frame[tcp + doff * 4..];
        if payload.is_empty() { None } else { Some(payload) }
    }
}

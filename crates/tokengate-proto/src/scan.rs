//! Bounded search for the `Authorization:` prefix.
//!
//! The scan looks at no more than [`MAX_SCAN_LEN`] bytes from the start of the
//! TCP payload, however large the payload is. That bound is what keeps the
//! per-frame cost predictable, so it can be lowered but never raised.
//!
//! Candidates are tried left to right and the first match wins. A candidate
//! is only compared if the prefix and the whole token after it fit inside the
//! window; the first candidate that does not fit ends the scan.

use crate::{
    FrameView,
    constants::{AUTH_PREFIX, MAX_SCAN_LEN, PREFIX_LEN, TOKEN_LEN},
};

/// Scanner tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    max_scan_len: usize,
}

impl ScanConfig {
    /// Config with the scan window capped at `max_scan_len` bytes.
    ///
    /// Values above [`MAX_SCAN_LEN`] are clamped to it.
    pub fn with_max_scan_len(max_scan_len: usize) -> Self {
        Self { max_scan_len: max_scan_len.min(MAX_SCAN_LEN) }
    }

    /// Effective window cap in bytes.
    pub const fn max_scan_len(&self) -> usize {
        self.max_scan_len
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { max_scan_len: MAX_SCAN_LEN }
    }
}

/// The region of the frame the scanner may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    /// Offset of the first payload byte in the frame
    pub start: usize,
    /// Number of bytes from `start` that may be examined
    pub limit: usize,
}

impl ScanWindow {
    /// Window over `frame_len - start` bytes, capped by `config`.
    ///
    /// A `start` at or past the end of the frame yields an empty window.
    pub fn new(frame_len: usize, start: usize, config: &ScanConfig) -> Self {
        let limit = frame_len.saturating_sub(start).min(config.max_scan_len());
        Self { start, limit }
    }
}

/// Result of a prefix scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Prefix found at `offset` bytes past the window start.
    Match {
        /// Offset of the prefix relative to the payload start
        offset: usize,
    },
    /// No usable prefix inside the window.
    NoMatch,
}

/// Scan `window` of `view` for the leftmost usable prefix.
pub fn scan(view: &FrameView<'_>, window: ScanWindow) -> ScanOutcome {
    for i in 0..window.limit {
        if i + PREFIX_LEN + TOKEN_LEN > window.limit {
            break;
        }

        // Cannot fail for a window built by `ScanWindow::new`, but the frame
        // bound is re-proved here rather than assumed.
        let Some(start) = window.start.checked_add(i) else {
            break;
        };
        if !view.has(start, PREFIX_LEN + TOKEN_LEN) {
            break;
        }

        if view.slice(start, PREFIX_LEN) == Some(AUTH_PREFIX.as_slice()) {
            return ScanOutcome::Match { offset: i };
        }
    }

    ScanOutcome::NoMatch
}

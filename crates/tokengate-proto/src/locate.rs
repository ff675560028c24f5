//! Header walk, prefix scan and token extraction as one step.
//!
//! [`locate`] is everything the filter does before it consults the
//! authorization table. Its result is either the token a frame presents or
//! the reason the frame carries none.

use crate::{
    FrameView, ScanConfig, ScanOutcome, ScanWindow, SkipReason, Token,
    constants::PREFIX_LEN,
    scan, token,
    walker::{self, ParsedHeaders},
};

/// A token found in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch {
    /// Headers walked to reach the payload
    pub headers: ParsedHeaders,
    /// Offset of the prefix relative to the payload start
    pub offset: usize,
    /// The 16 bytes following the prefix
    pub token: Token,
}

/// Find the token carried by `frame`, if any.
///
/// # Errors
///
/// Returns the [`SkipReason`] of the gate the frame stopped at. A frame that
/// passes every header gate but has no usable prefix in its scan window
/// yields [`SkipReason::NoAuthorizationHeader`].
pub fn locate(frame: &[u8], config: &ScanConfig) -> Result<TokenMatch, SkipReason> {
    let view = FrameView::new(frame);
    let headers = walker::walk(&view)?;

    let window = ScanWindow::new(view.len(), headers.payload_offset, config);
    let ScanOutcome::Match { offset } = scan::scan(&view, window) else {
        return Err(SkipReason::NoAuthorizationHeader);
    };

    // The scanner only matches when the token fits, so this never skips.
    let token = token::extract(&view, window.start + offset + PREFIX_LEN)
        .ok_or(SkipReason::NoAuthorizationHeader)?;

    Ok(TokenMatch { headers, offset, token })
}

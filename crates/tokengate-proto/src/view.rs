//! Bounds-checked read-only window over frame bytes.
//!
//! [`FrameView`] is the only way the rest of the crate touches frame data.
//! Every accessor first proves that `offset + len` lies inside the frame and
//! returns `None` otherwise, so a truncated or hostile frame can never cause
//! an out-of-range read or a panic. Offset arithmetic is checked as well; an
//! overflowing range is simply "not available".

use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

/// Read-only view over the bytes of a single received frame.
///
/// The view borrows the caller's buffer for the duration of one decision and
/// is never retained past it.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Wrap a frame buffer. `bytes.len()` is the frame length.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Frame length in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length frame.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if `[offset, offset + len)` lies entirely inside the frame.
    pub fn has(&self, offset: usize, len: usize) -> bool {
        offset.checked_add(len).is_some_and(|end| end <= self.bytes.len())
    }

    /// The `len` bytes starting at `offset`, if they are all in range.
    pub fn slice(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.bytes.get(offset..end)
    }

    /// Single byte at `offset`.
    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Big-endian (network order) `u16` at `offset`.
    pub fn read_be_u16(&self, offset: usize) -> Option<u16> {
        let bytes: [u8; 2] = self.slice(offset, 2)?.try_into().ok()?;
        Some(u16::from_be_bytes(bytes))
    }

    /// Fixed `N`-byte array at `offset`.
    pub fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.slice(offset, N)?.try_into().ok()
    }

    /// Zero-copy header reference at `offset`.
    ///
    /// Succeeds only when `size_of::<H>()` bytes are available. `H` must be
    /// `Unaligned`, so any offset is acceptable.
    pub fn header<H>(&self, offset: usize) -> Option<&'a H>
    where
        H: FromBytes + KnownLayout + Immutable + Unaligned,
    {
        let bytes = self.slice(offset, size_of::<H>())?;
        H::ref_from_bytes(bytes).ok()
    }
}

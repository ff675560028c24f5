//! Skip reasons and token parse errors.
//!
//! A [`SkipReason`] is not a failure of the filter. It names the gate at which
//! a frame stopped being a candidate for token inspection, and every one of
//! them results in the frame being passed.

use thiserror::Error;

/// Why a frame was passed without a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SkipReason {
    /// Frame is shorter than an Ethernet header.
    #[error("frame shorter than an Ethernet header")]
    TruncatedEthernet,

    /// EtherType is not IPv4.
    #[error("ether type {ether_type:#06x} is not IPv4")]
    NotIpv4 {
        /// EtherType found in the frame
        ether_type: u16,
    },

    /// Fixed 20-byte IPv4 header does not fit in the frame.
    #[error("frame too short for an IPv4 header")]
    TruncatedIpv4,

    /// IP protocol is not TCP.
    #[error("ip protocol {protocol} is not TCP")]
    NotTcp {
        /// Protocol number found in the IPv4 header
        protocol: u8,
    },

    /// IHL below the minimum of 5 words.
    #[error("ipv4 header length {ihl} below minimum")]
    BadIhl {
        /// IHL found in the IPv4 header, in 4-byte words
        ihl: u8,
    },

    /// IPv4 options run past the end of the frame.
    #[error("ipv4 options extend past end of frame")]
    TruncatedIpOptions,

    /// Fixed 20-byte TCP header does not fit in the frame.
    #[error("frame too short for a TCP header")]
    TruncatedTcp,

    /// TCP data offset below the minimum of 5 words.
    #[error("tcp data offset {doff} below minimum")]
    BadDataOffset {
        /// Data offset found in the TCP header, in 4-byte words
        doff: u8,
    },

    /// TCP options run past the end of the frame.
    #[error("tcp options extend past end of frame")]
    TruncatedTcpOptions,

    /// Headers are intact but there is no payload.
    #[error("tcp segment carries no payload")]
    EmptyPayload,

    /// No usable `Authorization:` prefix inside the scan window.
    #[error("no authorization header in scan window")]
    NoAuthorizationHeader,
}

impl SkipReason {
    /// Number of distinct skip reasons.
    pub const COUNT: usize = 11;

    /// Stable short labels, indexed by [`SkipReason::index`].
    pub const LABELS: [&'static str; Self::COUNT] = [
        "truncated-ethernet",
        "not-ipv4",
        "truncated-ipv4",
        "not-tcp",
        "bad-ihl",
        "truncated-ip-options",
        "truncated-tcp",
        "bad-data-offset",
        "truncated-tcp-options",
        "empty-payload",
        "no-authorization-header",
    ];

    /// Dense index in `0..COUNT`, in pipeline order.
    pub const fn index(&self) -> usize {
        match self {
            Self::TruncatedEthernet => 0,
            Self::NotIpv4 { .. } => 1,
            Self::TruncatedIpv4 => 2,
            Self::NotTcp { .. } => 3,
            Self::BadIhl { .. } => 4,
            Self::TruncatedIpOptions => 5,
            Self::TruncatedTcp => 6,
            Self::BadDataOffset { .. } => 7,
            Self::TruncatedTcpOptions => 8,
            Self::EmptyPayload => 9,
            Self::NoAuthorizationHeader => 10,
        }
    }

    /// Short kebab-case label, stable across releases.
    pub const fn label(&self) -> &'static str {
        Self::LABELS[self.index()]
    }
}

/// Errors from parsing a token out of its textual form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenParseError {
    /// Input is neither 16 raw bytes nor 32 hex characters.
    #[error("token must be 16 ASCII bytes or 32 hex characters, got {len} bytes")]
    InvalidLength {
        /// Length of the rejected input
        len: usize,
    },

    /// 32-character input that is not valid hex.
    #[error("invalid hex token: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

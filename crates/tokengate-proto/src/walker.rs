//! Ethernet → IPv4 → TCP header walk.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────────┐  IPv4  ┌──────────────┐  TCP, ihl ok  ┌───────────────┐
//! │ EthernetCheck │───────>│ IpHeaderCheck│──────────────>│ TcpHeaderCheck│
//! └───────────────┘        └──────────────┘               └───────────────┘
//!         │                        │                             │ doff ok
//!         │                        │                             ↓
//!         │                        │                     ┌───────────────┐
//!         │                        │                     │ PayloadLocate │──> scanner
//!         │                        │                     └───────────────┘
//!         ↓                        ↓                             ↓
//!      ┌──────────────────── Err(SkipReason) ─────────────────────┐
//! ```
//!
//! Every gate checks that the bytes it is about to read are inside the frame
//! before touching them. A failed gate is not an error for the caller, it
//! means the frame is not a candidate and will be passed.

use crate::{
    EthernetHeader, FrameView, Ipv4Header, SkipReason, TcpHeader,
    constants::{ETH_HEADER_LEN, ETHERTYPE_IPV4, IPPROTO_TCP, MIN_DATA_OFFSET, MIN_IHL},
};

/// Header fields the pipeline depends on, computed once per frame.
///
/// Invariant: `payload_offset < frame length`, and every offset below it was
/// range-checked before it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedHeaders {
    /// EtherType (always IPv4 for a successful walk)
    pub ether_type: u16,
    /// IP protocol (always TCP for a successful walk)
    pub ip_protocol: u8,
    /// IPv4 header length in 4-byte words, at least 5
    pub ip_header_len: u8,
    /// TCP header length in 4-byte words, at least 5
    pub tcp_header_len: u8,
    /// Offset of the first TCP payload byte from the start of the frame
    pub payload_offset: usize,
}

impl ParsedHeaders {
    /// IPv4 header length in bytes.
    pub fn ip_header_bytes(&self) -> usize {
        usize::from(self.ip_header_len) * 4
    }

    /// TCP header length in bytes.
    pub fn tcp_header_bytes(&self) -> usize {
        usize::from(self.tcp_header_len) * 4
    }
}

/// Walk the header stack of `view` up to the start of the TCP payload.
///
/// # Errors
///
/// Returns the [`SkipReason`] of the first gate the frame fails: truncated or
/// non-IPv4 Ethernet, non-TCP or malformed IPv4, malformed TCP, or an empty
/// payload.
pub fn walk(view: &FrameView<'_>) -> Result<ParsedHeaders, SkipReason> {
    let eth = view.header::<EthernetHeader>(0).ok_or(SkipReason::TruncatedEthernet)?;
    let ether_type = eth.ether_type();
    if ether_type != ETHERTYPE_IPV4 {
        return Err(SkipReason::NotIpv4 { ether_type });
    }

    let ip_start = ETH_HEADER_LEN;
    let ip = view.header::<Ipv4Header>(ip_start).ok_or(SkipReason::TruncatedIpv4)?;
    if ip.protocol != IPPROTO_TCP {
        return Err(SkipReason::NotTcp { protocol: ip.protocol });
    }
    let ihl = ip.ihl();
    if ihl < MIN_IHL {
        return Err(SkipReason::BadIhl { ihl });
    }
    if !view.has(ip_start, ip.header_len()) {
        return Err(SkipReason::TruncatedIpOptions);
    }

    let tcp_start = ip_start + ip.header_len();
    let tcp = view.header::<TcpHeader>(tcp_start).ok_or(SkipReason::TruncatedTcp)?;
    let doff = tcp.doff();
    if doff < MIN_DATA_OFFSET {
        return Err(SkipReason::BadDataOffset { doff });
    }
    if !view.has(tcp_start, tcp.header_len()) {
        return Err(SkipReason::TruncatedTcpOptions);
    }

    let payload_offset = tcp_start + tcp.header_len();
    if payload_offset >= view.len() {
        return Err(SkipReason::EmptyPayload);
    }

    Ok(ParsedHeaders {
        ether_type,
        ip_protocol: ip.protocol,
        ip_header_len: ihl,
        tcp_header_len: doff,
        payload_offset,
    })
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    // Ethernet(IPv4) + IPv4(ihl=5, TCP) + TCP(doff=5) + "hi"
    const MINIMAL: [u8; 56] = hex!(
        "020000000002 020000000001 0800"
        "45 00 002a 0000 4000 40 06 0000 0a000001 0a000002"
        "9c40 0050 00000001 00000000 50 18 ffff 0000 0000"
        "6869"
    );

    #[test]
    fn minimal_frame_reaches_payload() {
        let headers = walk(&FrameView::new(&MINIMAL)).unwrap();
        assert_eq!(headers.ether_type, ETHERTYPE_IPV4);
        assert_eq!(headers.ip_protocol, IPPROTO_TCP);
        assert_eq!(headers.ip_header_len, 5);
        assert_eq!(headers.tcp_header_len, 5);
        assert_eq!(headers.payload_offset, 54);
    }

    #[test]
    fn every_truncation_is_a_skip() {
        // 54 bytes is headers only; anything shorter is cut inside a header.
        for len in 0..=54 {
            let result = walk(&FrameView::new(&MINIMAL[..len]));
            assert!(result.is_err(), "prefix of {len} bytes must not reach the payload");
        }
    }

    #[test]
    fn one_payload_byte_is_enough() {
        let headers = walk(&FrameView::new(&MINIMAL[..55])).unwrap();
        assert_eq!(headers.payload_offset, 54);
    }

    #[test]
    fn truncation_reasons_follow_gate_order() {
        let skip = |len: usize| walk(&FrameView::new(&MINIMAL[..len])).unwrap_err();
        assert_eq!(skip(13), SkipReason::TruncatedEthernet);
        assert_eq!(skip(33), SkipReason::TruncatedIpv4);
        assert_eq!(skip(53), SkipReason::TruncatedTcp);
        assert_eq!(skip(54), SkipReason::EmptyPayload);
    }

    #[test]
    fn arp_is_not_ipv4() {
        let mut frame = MINIMAL;
        frame[12..14].copy_from_slice(&[0x08, 0x06]);
        assert_eq!(
            walk(&FrameView::new(&frame)),
            Err(SkipReason::NotIpv4 { ether_type: 0x0806 })
        );
    }

    #[test]
    fn udp_is_not_tcp() {
        let mut frame = MINIMAL;
        frame[23] = 17;
        assert_eq!(walk(&FrameView::new(&frame)), Err(SkipReason::NotTcp { protocol: 17 }));
    }

    #[test]
    fn ihl_below_five_is_rejected() {
        let mut frame = MINIMAL;
        frame[14] = 0x44;
        assert_eq!(walk(&FrameView::new(&frame)), Err(SkipReason::BadIhl { ihl: 4 }));
    }

    #[test]
    fn ihl_past_end_of_frame() {
        let mut frame = MINIMAL;
        frame[14] = 0x4F; // 60-byte header, frame has 42 bytes after Ethernet
        assert_eq!(walk(&FrameView::new(&frame)), Err(SkipReason::TruncatedIpOptions));
    }

    #[test]
    fn doff_below_five_is_rejected() {
        let mut frame = MINIMAL;
        frame[46] = 0x40;
        assert_eq!(walk(&FrameView::new(&frame)), Err(SkipReason::BadDataOffset { doff: 4 }));
    }

    #[test]
    fn doff_past_end_of_frame() {
        let mut frame = MINIMAL;
        frame[46] = 0xF0;
        assert_eq!(walk(&FrameView::new(&frame)), Err(SkipReason::TruncatedTcpOptions));
    }

    #[test]
    fn options_consumed_by_length() {
        // ihl = 6 pushes TCP four bytes further; the option bytes are opaque.
        let mut frame = Vec::with_capacity(MINIMAL.len() + 4);
        frame.extend_from_slice(&MINIMAL[..34]);
        frame.extend_from_slice(&[1, 1, 1, 0]);
        frame.extend_from_slice(&MINIMAL[34..]);
        frame[14] = 0x46;

        let headers = walk(&FrameView::new(&frame)).unwrap();
        assert_eq!(headers.ip_header_bytes(), 24);
        assert_eq!(headers.payload_offset, 58);
    }
}

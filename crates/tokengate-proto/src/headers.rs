//! Fixed-layout Ethernet, IPv4 and TCP headers.
//!
//! These are zero-copy overlays: a header is never decoded into a new value,
//! it is a typed reference into the frame obtained through
//! [`FrameView::header`](crate::FrameView::header). Multi-byte fields use
//! `zerocopy`'s network-endian integers, so reading them cannot get the byte
//! order wrong and every struct is `Unaligned`.
//!
//! Only the fixed part of each header is described. IPv4 and TCP options are
//! skipped by length, never parsed.

use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::network_endian::{U16, U32},
};

use crate::constants::{ETH_HEADER_LEN, IPV4_MIN_HEADER_LEN, TCP_MIN_HEADER_LEN};

/// Ethernet II header.
///
/// ```text
/// [0..6]   Destination MAC
/// [6..12]  Source MAC
/// [12..14] EtherType (big-endian)
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct EthernetHeader {
    /// Destination MAC address
    pub destination: [u8; 6],
    /// Source MAC address
    pub source: [u8; 6],
    /// EtherType
    pub ether_type: U16,
}

impl EthernetHeader {
    /// Size in bytes.
    pub const SIZE: usize = ETH_HEADER_LEN;

    /// EtherType in host order.
    pub fn ether_type(&self) -> u16 {
        self.ether_type.get()
    }
}

/// Fixed 20-byte part of an IPv4 header.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct Ipv4Header {
    /// Version (high nibble) and IHL (low nibble)
    pub version_ihl: u8,
    /// DSCP and ECN
    pub tos: u8,
    /// Total length of the datagram
    pub total_len: U16,
    /// Identification
    pub id: U16,
    /// Flags and fragment offset
    pub frag_off: U16,
    /// Time to live
    pub ttl: u8,
    /// Upper-layer protocol number
    pub protocol: u8,
    /// Header checksum
    pub checksum: U16,
    /// Source address
    pub source: [u8; 4],
    /// Destination address
    pub destination: [u8; 4],
}

impl Ipv4Header {
    /// Size of the fixed part in bytes.
    pub const SIZE: usize = IPV4_MIN_HEADER_LEN;

    /// IP version nibble. Not validated by the walker.
    pub fn version(&self) -> u8 {
        self.version_ihl >> 4
    }

    /// Header length in 4-byte words, options included.
    pub fn ihl(&self) -> u8 {
        self.version_ihl & 0x0F
    }

    /// Header length in bytes, options included.
    pub fn header_len(&self) -> usize {
        usize::from(self.ihl()) * 4
    }
}

/// Fixed 20-byte part of a TCP header.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct TcpHeader {
    /// Source port
    pub source_port: U16,
    /// Destination port
    pub destination_port: U16,
    /// Sequence number
    pub seq: U32,
    /// Acknowledgement number
    pub ack: U32,
    /// Data offset (high nibble) and reserved bits
    pub data_offset: u8,
    /// Control flags (CWR..FIN)
    pub flags: u8,
    /// Receive window
    pub window: U16,
    /// Checksum
    pub checksum: U16,
    /// Urgent pointer
    pub urgent: U16,
}

impl TcpHeader {
    /// Size of the fixed part in bytes.
    pub const SIZE: usize = TCP_MIN_HEADER_LEN;

    /// Data offset in 4-byte words, options included.
    pub fn doff(&self) -> u8 {
        self.data_offset >> 4
    }

    /// Header length in bytes, options included.
    pub fn header_len(&self) -> usize {
        usize::from(self.doff()) * 4
    }
}

const _: () = assert!(size_of::<EthernetHeader>() == EthernetHeader::SIZE);
const _: () = assert!(size_of::<Ipv4Header>() == Ipv4Header::SIZE);
const _: () = assert!(size_of::<TcpHeader>() == TcpHeader::SIZE);

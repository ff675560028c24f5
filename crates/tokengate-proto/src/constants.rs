//! Protocol numbers, header sizes and the token wire contract.
//!
//! The prefix literal, the token length and the scan window form a de facto
//! contract with every client that sends tokens. Changing any of them changes
//! which frames are dropped.

/// Length of an Ethernet II header (no 802.1Q tag, FCS stripped by the NIC).
pub const ETH_HEADER_LEN: usize = 14;

/// Offset of the EtherType field inside the Ethernet header.
pub const ETHER_TYPE_OFFSET: usize = 12;

/// EtherType for IPv4.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// EtherType for ARP.
pub const ETHERTYPE_ARP: u16 = 0x0806;

/// EtherType for IPv6. Not inspected; listed for tests and diagnostics.
pub const ETHERTYPE_IPV6: u16 = 0x86DD;

/// IP protocol number for TCP.
pub const IPPROTO_TCP: u8 = 6;

/// IP protocol number for UDP.
pub const IPPROTO_UDP: u8 = 17;

/// Fixed part of an IPv4 header, before options.
pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// Fixed part of a TCP header, before options.
pub const TCP_MIN_HEADER_LEN: usize = 20;

/// Smallest legal IPv4 IHL, in 4-byte words.
pub const MIN_IHL: u8 = 5;

/// Smallest legal TCP data offset, in 4-byte words.
pub const MIN_DATA_OFFSET: u8 = 5;

/// Literal that introduces the token. Case-sensitive, no whitespace skipping.
pub const AUTH_PREFIX: &[u8; PREFIX_LEN] = b"Authorization:";

/// Length of [`AUTH_PREFIX`].
pub const PREFIX_LEN: usize = 14;

/// Token length. The token starts at the byte right after the prefix.
pub const TOKEN_LEN: usize = 16;

/// Upper bound on the number of payload bytes examined per frame.
pub const MAX_SCAN_LEN: usize = 256;

/// Number of distinct tokens the authorization table can hold.
pub const AUTH_TABLE_CAPACITY: usize = 128;

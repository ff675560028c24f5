//! Ethernet/IPv4/TCP frame builder.
//!
//! Produces frames the way a host NIC would hand them to the filter: no
//! preamble, no FCS. Header fields the filter never reads (addresses, ports,
//! checksums) get fixed plausible values.
//!
//! Out-of-range IHL and data offset values are written as given so tests can
//! build malformed frames; option bytes are only emitted for values above the
//! minimum of 5 words.

use tokengate_proto::constants::{
    AUTH_PREFIX, ETHERTYPE_IPV4, IPPROTO_TCP, IPV4_MIN_HEADER_LEN, MIN_DATA_OFFSET, MIN_IHL,
    TCP_MIN_HEADER_LEN, TOKEN_LEN,
};

const DST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];
const SRC_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
const SRC_IP: [u8; 4] = [10, 0, 0, 1];
const DST_IP: [u8; 4] = [10, 0, 0, 2];
const SRC_PORT: u16 = 40_000;
const DST_PORT: u16 = 80;
const TCP_PSH_ACK: u8 = 0x18;

/// Builder for a single Ethernet frame carrying an IPv4/TCP segment.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    ether_type: u16,
    ip_protocol: u8,
    ihl: u8,
    doff: u8,
    payload: Vec<u8>,
}

impl FrameBuilder {
    /// Well-formed IPv4/TCP frame with no options and an empty payload.
    pub fn tcp() -> Self {
        Self {
            ether_type: ETHERTYPE_IPV4,
            ip_protocol: IPPROTO_TCP,
            ihl: MIN_IHL,
            doff: MIN_DATA_OFFSET,
            payload: Vec::new(),
        }
    }

    /// Override the EtherType. The IPv4/TCP bytes are still emitted.
    pub fn ether_type(mut self, ether_type: u16) -> Self {
        self.ether_type = ether_type;
        self
    }

    /// Override the IP protocol number.
    pub fn ip_protocol(mut self, protocol: u8) -> Self {
        self.ip_protocol = protocol;
        self
    }

    /// IPv4 header length in words (low nibble only).
    pub fn ihl(mut self, ihl: u8) -> Self {
        self.ihl = ihl & 0x0F;
        self
    }

    /// TCP data offset in words (low nibble only).
    pub fn doff(mut self, doff: u8) -> Self {
        self.doff = doff & 0x0F;
        self
    }

    /// TCP payload.
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Offset the payload will start at, if the headers are well formed.
    pub fn payload_offset(&self) -> usize {
        14 + self.ip_header_len() + self.tcp_header_len()
    }

    fn ip_header_len(&self) -> usize {
        IPV4_MIN_HEADER_LEN.max(usize::from(self.ihl) * 4)
    }

    fn tcp_header_len(&self) -> usize {
        TCP_MIN_HEADER_LEN.max(usize::from(self.doff) * 4)
    }

    /// Serialize the frame.
    pub fn build(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(self.payload_offset() + self.payload.len());

        frame.extend_from_slice(&DST_MAC);
        frame.extend_from_slice(&SRC_MAC);
        frame.extend_from_slice(&self.ether_type.to_be_bytes());

        let total_len = self.ip_header_len() + self.tcp_header_len() + self.payload.len();
        let total_len = u16::try_from(total_len).unwrap_or(u16::MAX);
        frame.push(0x40 | self.ihl);
        frame.push(0);
        frame.extend_from_slice(&total_len.to_be_bytes());
        frame.extend_from_slice(&[0x12, 0x34]); // id
        frame.extend_from_slice(&[0x40, 0x00]); // DF
        frame.push(64);
        frame.push(self.ip_protocol);
        frame.extend_from_slice(&[0, 0]); // checksum, never verified
        frame.extend_from_slice(&SRC_IP);
        frame.extend_from_slice(&DST_IP);
        frame.resize(frame.len() + self.ip_header_len() - IPV4_MIN_HEADER_LEN, 0x01); // NOP

        frame.extend_from_slice(&SRC_PORT.to_be_bytes());
        frame.extend_from_slice(&DST_PORT.to_be_bytes());
        frame.extend_from_slice(&1u32.to_be_bytes());
        frame.extend_from_slice(&1u32.to_be_bytes());
        frame.push(self.doff << 4);
        frame.push(TCP_PSH_ACK);
        frame.extend_from_slice(&0xffffu16.to_be_bytes());
        frame.extend_from_slice(&[0, 0, 0, 0]); // checksum, urgent pointer
        frame.resize(frame.len() + self.tcp_header_len() - TCP_MIN_HEADER_LEN, 0x01); // NOP

        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// HTTP request line followed by `Authorization:` and `token`.
///
/// The token follows the colon directly, as the wire contract requires.
pub fn http_request(token: &[u8; TOKEN_LEN]) -> Vec<u8> {
    let mut payload = b"GET / HTTP/1.1\r\n".to_vec();
    payload.extend_from_slice(AUTH_PREFIX);
    payload.extend_from_slice(token);
    payload
}

#[cfg(test)]
mod tests {
    use tokengate_proto::{FrameView, walker};

    use super::*;

    #[test]
    fn default_frame_layout() {
        let frame = FrameBuilder::tcp().payload(b"x".as_slice()).build();
        assert_eq!(frame.len(), 55);

        let headers = walker::walk(&FrameView::new(&frame)).unwrap();
        assert_eq!(headers.payload_offset, 54);
    }

    #[test]
    fn options_are_padded() {
        let builder = FrameBuilder::tcp().ihl(6).doff(8).payload(b"x".as_slice());
        let frame = builder.build();
        assert_eq!(builder.payload_offset(), 14 + 24 + 32);

        let headers = walker::walk(&FrameView::new(&frame)).unwrap();
        assert_eq!(headers.payload_offset, builder.payload_offset());
    }

    #[test]
    fn malformed_offsets_written_verbatim() {
        let frame = FrameBuilder::tcp().ihl(3).doff(4).build();
        assert_eq!(frame[14] & 0x0F, 3);
        assert_eq!(frame[14 + 20 + 12] >> 4, 4);
        assert_eq!(frame.len(), 54);
    }

    #[test]
    fn request_payload() {
        let payload = http_request(b"0123456789abcdef");
        assert_eq!(payload, b"GET / HTTP/1.1\r\nAuthorization:0123456789abcdef");
    }
}

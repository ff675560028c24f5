//! Proptest strategies for frames and tokens.
//!
//! Uniformly random bytes almost never get past the Ethernet gate, so
//! [`arb_frame`] builds frames from header knobs that are valid most of the
//! time and payloads that usually carry a prefix and a token. Roughly half of
//! the generated tokens come from the caller's pool, which keeps both the
//! Pass and the Drop branch of the lookup busy.

use proptest::{collection::vec, prelude::*, sample::select};
use tokengate_proto::{
    Token,
    constants::{AUTH_PREFIX, ETHERTYPE_ARP, ETHERTYPE_IPV4, IPPROTO_TCP, IPPROTO_UDP, TOKEN_LEN},
};

use crate::FrameBuilder;

/// Any 16-byte token.
pub fn arb_token() -> impl Strategy<Value = Token> {
    any::<[u8; TOKEN_LEN]>().prop_map(Token::new)
}

fn arb_presented_token(pool: Vec<Token>) -> BoxedStrategy<Option<Token>> {
    if pool.is_empty() {
        return prop_oneof![3 => arb_token().prop_map(Some), 1 => Just(None)].boxed();
    }
    prop_oneof![
        3 => select(pool).prop_map(Some),
        3 => arb_token().prop_map(Some),
        2 => Just(None),
    ]
    .boxed()
}

fn arb_payload(pool: Vec<Token>) -> impl Strategy<Value = Vec<u8>> {
    (vec(any::<u8>(), 0..300), arb_presented_token(pool), vec(any::<u8>(), 0..40)).prop_map(
        |(lead, token, tail)| {
            let mut payload = lead;
            if let Some(token) = token {
                payload.extend_from_slice(AUTH_PREFIX);
                payload.extend_from_slice(token.as_bytes());
            }
            payload.extend_from_slice(&tail);
            payload
        },
    )
}

/// Frames that exercise every gate, presenting tokens drawn partly from
/// `pool`.
pub fn arb_frame(pool: Vec<Token>) -> BoxedStrategy<Vec<u8>> {
    let ether_type = prop_oneof![
        8 => Just(ETHERTYPE_IPV4),
        1 => Just(ETHERTYPE_ARP),
        1 => any::<u16>(),
    ];
    let protocol = prop_oneof![
        8 => Just(IPPROTO_TCP),
        1 => Just(IPPROTO_UDP),
        1 => any::<u8>(),
    ];
    let ihl = prop_oneof![8 => Just(5u8), 2 => 0u8..16];
    let doff = prop_oneof![8 => Just(5u8), 2 => 0u8..16];
    let truncate = prop_oneof![8 => Just(None), 2 => (0usize..400).prop_map(Some)];

    (ether_type, protocol, ihl, doff, arb_payload(pool), truncate)
        .prop_map(|(ether_type, protocol, ihl, doff, payload, truncate)| {
            let mut frame = FrameBuilder::tcp()
                .ether_type(ether_type)
                .ip_protocol(protocol)
                .ihl(ihl)
                .doff(doff)
                .payload(payload)
                .build();
            if let Some(len) = truncate {
                frame.truncate(len);
            }
            frame
        })
        .boxed()
}

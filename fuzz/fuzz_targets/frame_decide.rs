//! Arbitrary bytes through the whole filter.
//!
//! The filter must never panic, must pass anything it cannot parse, and may
//! only report a token that lies inside the scan window.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tokengate_core::{Decision, Filter, TokenTable, VerdictReason};
use tokengate_proto::{
    ScanConfig, Token, locate,
    constants::{MAX_SCAN_LEN, PREFIX_LEN, TOKEN_LEN},
};

fuzz_target!(|data: &[u8]| {
    // Authorize whatever sits in the first 16 bytes so both lookup outcomes
    // are reachable.
    let mut table = TokenTable::new();
    if let Some(bytes) = data.get(..TOKEN_LEN) {
        let mut token = [0u8; TOKEN_LEN];
        token.copy_from_slice(bytes);
        let _ = table.insert(Token::new(token));
    }

    let filter = Filter::new(&table);
    let verdict = filter.inspect(data);

    match verdict.reason {
        VerdictReason::Skipped(_) => assert_eq!(verdict.decision, Decision::Pass),
        VerdictReason::Authorized { offset } | VerdictReason::Unauthorized { offset } => {
            assert!(offset + PREFIX_LEN + TOKEN_LEN <= MAX_SCAN_LEN);
        },
    }

    if let Ok(found) = locate(data, &ScanConfig::default()) {
        let end = found.headers.payload_offset + found.offset + PREFIX_LEN + TOKEN_LEN;
        assert!(end <= data.len());
    }
});

//! Model-based property tests.
//!
//! Generated frames go through the real filter and the reference model; the
//! decisions must agree.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: (token pool, frame)
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelFilter      Filter         Compare
//!      (reference)     (pipeline)      Decisions
//! ```

use std::collections::HashSet;

use proptest::{collection::vec, prelude::*};
use tokengate_core::{
    Decision, Filter, FilterConfig, SharedTable, Token, TokenTable, VerdictReason, decide,
};
use tokengate_harness::{ModelFilter, arb_frame, arb_token};
use tokengate_proto::ScanConfig;

fn pool_and_frame() -> impl Strategy<Value = (Vec<Token>, Vec<u8>)> {
    vec(arb_token(), 0..8).prop_flat_map(|pool| {
        let frames = arb_frame(pool.clone());
        (Just(pool), frames)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn pipeline_matches_model((pool, frame) in pool_and_frame()) {
        let model = ModelFilter::new(pool.iter().copied());
        let table: HashSet<Token> = pool.iter().copied().collect();

        prop_assert_eq!(decide(&frame, &table), model.decide(&frame));
    }

    #[test]
    fn presented_token_matches_model((pool, frame) in pool_and_frame()) {
        let model = ModelFilter::new(pool.iter().copied());
        let filter = Filter::new(TokenTable::from_tokens(pool.iter().copied()).unwrap());

        let verdict = filter.inspect(&frame);
        match (verdict.reason, model.token_in(&frame)) {
            (VerdictReason::Skipped(_), None)
            | (VerdictReason::Authorized { .. } | VerdictReason::Unauthorized { .. }, Some(_)) => {},
            (reason, token) => {
                prop_assert!(false, "verdict {reason:?} disagrees with model token {token:?}");
            },
        }
    }

    #[test]
    fn smaller_window_matches_model(
        (pool, frame) in pool_and_frame(),
        max_scan_len in 0usize..300,
    ) {
        let model = ModelFilter::new(pool.iter().copied()).with_max_scan_len(max_scan_len);
        let config = FilterConfig { scan: ScanConfig::with_max_scan_len(max_scan_len) };
        let filter = Filter::with_config(pool.iter().copied().collect::<HashSet<_>>(), config);

        prop_assert_eq!(filter.decide(&frame), model.decide(&frame));
    }

    #[test]
    fn decisions_are_idempotent((pool, frame) in pool_and_frame()) {
        let table = SharedTable::new(TokenTable::from_tokens(pool).unwrap());
        let filter = Filter::new(&table);

        let first = filter.inspect(&frame);
        for _ in 0..3 {
            prop_assert_eq!(filter.inspect(&frame), first);
        }
    }

    #[test]
    fn empty_table_never_passes_a_presented_token((_pool, frame) in pool_and_frame()) {
        let table: HashSet<Token> = HashSet::new();
        let model = ModelFilter::new([]);

        let expected =
            if model.token_in(&frame).is_some() { Decision::Drop } else { Decision::Pass };
        prop_assert_eq!(decide(&frame, &table), expected);
    }
}

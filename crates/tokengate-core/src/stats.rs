//! Outcome counters for hosts running the filter.
//!
//! The filter itself is stateless; a host that wants to know what it has
//! been doing records each [`Verdict`] here. All counters are relaxed atomics
//! and may be updated from any number of threads.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use tokengate_proto::SkipReason;

use crate::{Decision, Verdict, VerdictReason};

/// Lock-free verdict counters.
#[derive(Debug, Default)]
pub struct FilterStats {
    frames: AtomicU64,
    passed: AtomicU64,
    dropped: AtomicU64,
    authorized: AtomicU64,
    skipped: [AtomicU64; SkipReason::COUNT],
}

impl FilterStats {
    /// Zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one verdict.
    pub fn record(&self, verdict: &Verdict) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        match verdict.decision {
            Decision::Pass => self.passed.fetch_add(1, Ordering::Relaxed),
            Decision::Drop => self.dropped.fetch_add(1, Ordering::Relaxed),
        };
        match verdict.reason {
            VerdictReason::Skipped(reason) => {
                self.skipped[reason.index()].fetch_add(1, Ordering::Relaxed);
            },
            VerdictReason::Authorized { .. } => {
                self.authorized.fetch_add(1, Ordering::Relaxed);
            },
            VerdictReason::Unauthorized { .. } => {},
        }
    }

    /// Point-in-time copy of every counter.
    ///
    /// Counters are read one by one, so a snapshot taken while frames are
    /// being recorded may be off by the frames in flight.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            passed: self.passed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            authorized: self.authorized.load(Ordering::Relaxed),
            skipped: std::array::from_fn(|i| self.skipped[i].load(Ordering::Relaxed)),
        }
    }
}

/// Plain copy of [`FilterStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Frames inspected
    pub frames: u64,
    /// Frames passed, for any reason
    pub passed: u64,
    /// Frames dropped
    pub dropped: u64,
    /// Frames passed because their token was authorized
    pub authorized: u64,
    /// Frames passed without a lookup, indexed by [`SkipReason::index`]
    pub skipped: [u64; SkipReason::COUNT],
}

impl StatsSnapshot {
    /// Passes attributed to `reason`.
    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skipped[reason.index()]
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames: {}", self.frames)?;
        writeln!(f, "passed: {}", self.passed)?;
        writeln!(f, "dropped: {}", self.dropped)?;
        writeln!(f, "authorized: {}", self.authorized)?;
        for (label, count) in SkipReason::LABELS.iter().zip(self.skipped) {
            if count > 0 {
                writeln!(f, "skipped {label}: {count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_each_outcome() {
        let stats = FilterStats::new();
        stats.record(&Verdict::skipped(SkipReason::EmptyPayload));
        stats.record(&Verdict::skipped(SkipReason::EmptyPayload));
        stats.record(&Verdict {
            decision: Decision::Pass,
            reason: VerdictReason::Authorized { offset: 0 },
        });
        stats.record(&Verdict {
            decision: Decision::Drop,
            reason: VerdictReason::Unauthorized { offset: 3 },
        });

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.frames, 4);
        assert_eq!(snapshot.passed, 3);
        assert_eq!(snapshot.dropped, 1);
        assert_eq!(snapshot.authorized, 1);
        assert_eq!(snapshot.skipped_for(SkipReason::EmptyPayload), 2);
        assert_eq!(snapshot.skipped_for(SkipReason::TruncatedTcp), 0);
    }

    #[test]
    fn display_lists_nonzero_skips() {
        let stats = FilterStats::new();
        stats.record(&Verdict::skipped(SkipReason::NotIpv4 { ether_type: 0x0806 }));

        let text = stats.snapshot().to_string();
        assert_eq!(
            text,
            "frames: 1\npassed: 1\ndropped: 0\nauthorized: 0\nskipped not-ipv4: 1\n"
        );
    }
}

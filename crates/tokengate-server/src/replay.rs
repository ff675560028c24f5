//! Running captured frames through the filter.
//!
//! Frames are split into contiguous chunks, one per worker. Every worker
//! holds its own [`Filter`] over the same table and records into the same
//! [`FilterStats`], the way per-CPU program instances share one map.

use std::thread;

use tokengate_core::{
    AuthorizationTable, Decision, Filter, FilterConfig, FilterStats, StatsSnapshot,
};

/// Run every frame through a filter over `table` and return the counters.
///
/// `workers` is clamped to at least one and at most the number of frames.
pub fn replay<T>(
    frames: &[Vec<u8>],
    table: &T,
    config: FilterConfig,
    workers: usize,
) -> StatsSnapshot
where
    T: AuthorizationTable + ?Sized,
{
    let stats = FilterStats::new();
    let workers = workers.clamp(1, frames.len().max(1));
    let chunk_len = frames.len().div_ceil(workers).max(1);

    if workers == 1 {
        replay_chunk(0, frames, table, config, &stats);
    } else {
        thread::scope(|scope| {
            for (index, chunk) in frames.chunks(chunk_len).enumerate() {
                let stats = &stats;
                scope.spawn(move || replay_chunk(index * chunk_len, chunk, table, config, stats));
            }
        });
    }

    let snapshot = stats.snapshot();
    tracing::info!(
        frames = snapshot.frames,
        passed = snapshot.passed,
        dropped = snapshot.dropped,
        workers,
        "replay finished"
    );
    snapshot
}

fn replay_chunk<T>(
    first: usize,
    frames: &[Vec<u8>],
    table: &T,
    config: FilterConfig,
    stats: &FilterStats,
) where
    T: AuthorizationTable + ?Sized,
{
    let filter = Filter::with_config(table, config);
    for (index, frame) in frames.iter().enumerate() {
        let verdict = filter.inspect(frame);
        stats.record(&verdict);
        match verdict.decision {
            Decision::Pass => tracing::debug!(frame = first + index, %verdict),
            Decision::Drop => tracing::info!(frame = first + index, %verdict, "dropped"),
        }
    }
}

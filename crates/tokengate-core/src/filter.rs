//! The per-frame filter pipeline.
//!
//! ```text
//! frame ──> locate() ──> Result<TokenMatch, SkipReason> ──> Verdict::from_scan(table) ──> Decision
//! ```
//!
//! [`Filter`] owns nothing mutable. Concurrent calls on independent frames
//! are safe as long as the table is, which the [`AuthorizationTable`] bound
//! guarantees (`Send + Sync`).

use tokengate_proto::{ScanConfig, locate};

use crate::{AuthorizationTable, Decision, Verdict};

/// Filter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Payload scan bounds
    pub scan: ScanConfig,
}

/// Authorization filter over table `T`.
#[derive(Debug, Clone)]
pub struct Filter<T> {
    table: T,
    config: FilterConfig,
}

impl<T: AuthorizationTable> Filter<T> {
    /// Filter with default configuration.
    pub fn new(table: T) -> Self {
        Self::with_config(table, FilterConfig::default())
    }

    /// Filter with explicit configuration.
    pub fn with_config(table: T, config: FilterConfig) -> Self {
        Self { table, config }
    }

    /// The table consulted for lookups.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Active configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Decide on `frame` and say why.
    pub fn inspect(&self, frame: &[u8]) -> Verdict {
        let scan = locate(frame, &self.config.scan);
        Verdict::from_scan(&scan, &self.table)
    }

    /// Decide on `frame`.
    pub fn decide(&self, frame: &[u8]) -> Decision {
        self.inspect(frame).decision
    }
}

/// Decide on `frame` against `table` with default configuration.
pub fn decide<T>(frame: &[u8], table: &T) -> Decision
where
    T: AuthorizationTable + ?Sized,
{
    let scan = locate(frame, &ScanConfig::default());
    Verdict::from_scan(&scan, table).decision
}

//! Pass/Drop decisions.
//!
//! | Scan result                        | Table lookup | Decision |
//! |------------------------------------|--------------|----------|
//! | skipped (any [`SkipReason`])       | not made     | Pass     |
//! | token found                        | present      | Pass     |
//! | token found                        | absent       | Drop     |
//!
//! A token that is found is always looked up, whatever its bytes are. A
//! payload reading `Authorization:` followed by sixteen bytes that were never
//! meant as a token is therefore dropped unless those bytes happen to be in
//! the table. Clients depend on this, so it is kept as is.

use std::fmt;

use tokengate_proto::{SkipReason, TokenMatch};

use crate::AuthorizationTable;

/// What the host should do with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Forward normally.
    Pass,
    /// Discard silently.
    Drop,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

/// Why a decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictReason {
    /// Not a candidate for token inspection.
    Skipped(SkipReason),
    /// Token found and present in the table.
    Authorized {
        /// Prefix offset relative to the payload start
        offset: usize,
    },
    /// Token found and absent from the table.
    Unauthorized {
        /// Prefix offset relative to the payload start
        offset: usize,
    },
}

/// A decision together with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Pass or Drop
    pub decision: Decision,
    /// Why
    pub reason: VerdictReason,
}

impl Verdict {
    /// Pass verdict for a frame that was not inspected.
    pub const fn skipped(reason: SkipReason) -> Self {
        Self { decision: Decision::Pass, reason: VerdictReason::Skipped(reason) }
    }

    /// Combine a scan result with a table lookup.
    pub fn from_scan<T>(scan: &Result<TokenMatch, SkipReason>, table: &T) -> Self
    where
        T: AuthorizationTable + ?Sized,
    {
        match scan {
            Err(reason) => Self::skipped(*reason),
            Ok(found) if table.contains(&found.token) => Self {
                decision: Decision::Pass,
                reason: VerdictReason::Authorized { offset: found.offset },
            },
            Ok(found) => Self {
                decision: Decision::Drop,
                reason: VerdictReason::Unauthorized { offset: found.offset },
            },
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            VerdictReason::Skipped(reason) => write!(f, "{} ({})", self.decision, reason.label()),
            VerdictReason::Authorized { offset } => {
                write!(f, "{} (authorized token at payload offset {offset})", self.decision)
            },
            VerdictReason::Unauthorized { offset } => {
                write!(f, "{} (unauthorized token at payload offset {offset})", self.decision)
            },
        }
    }
}

//! Authorization tables.
//!
//! The decision path only ever asks one question of a table: does it contain
//! this exact token? That is the [`AuthorizationTable`] trait. Populating the
//! table is the control plane's job and happens through [`TokenTable`] and
//! [`SharedTable`].
//!
//! # Concurrency
//!
//! [`SharedTable`] publishes immutable snapshots. A lookup reads whichever
//! snapshot is current; an update copies the current set, mutates the copy
//! and swaps it in. Readers therefore see either the old set or the new one,
//! never a partially applied update.
//!
//! The copy is made under an upgradable read lock, which admits lookups and
//! excludes other writers. Lookups are only held off while the lock is
//! upgraded for the pointer swap.

use std::{collections::HashSet, hash::BuildHasher, sync::Arc};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use thiserror::Error;
use tokengate_proto::{Token, constants::AUTH_TABLE_CAPACITY};

/// Exact-match token lookup, callable from the per-frame path.
///
/// Implementations must answer in bounded time without blocking on I/O.
pub trait AuthorizationTable: Send + Sync {
    /// True if `token` is authorized.
    fn contains(&self, token: &Token) -> bool;
}

impl<T: AuthorizationTable + ?Sized> AuthorizationTable for &T {
    fn contains(&self, token: &Token) -> bool {
        (**self).contains(token)
    }
}

impl<T: AuthorizationTable + ?Sized> AuthorizationTable for Arc<T> {
    fn contains(&self, token: &Token) -> bool {
        (**self).contains(token)
    }
}

impl<S: BuildHasher + Send + Sync> AuthorizationTable for HashSet<Token, S> {
    fn contains(&self, token: &Token) -> bool {
        HashSet::contains(self, token)
    }
}

/// Errors from table management operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table already holds `capacity` distinct tokens.
    #[error("authorization table full ({capacity} tokens)")]
    Full {
        /// Capacity of the table
        capacity: usize,
    },
}

/// Fixed-capacity set of authorized tokens.
#[derive(Debug, Clone)]
pub struct TokenTable {
    tokens: HashSet<Token>,
    capacity: usize,
}

impl TokenTable {
    /// Empty table with the default capacity of 128 tokens.
    pub fn new() -> Self {
        Self::with_capacity(AUTH_TABLE_CAPACITY)
    }

    /// Empty table holding at most `capacity` tokens.
    ///
    /// Values above 128 are clamped to it. Storage grows with the tokens
    /// actually inserted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { tokens: HashSet::new(), capacity: capacity.min(AUTH_TABLE_CAPACITY) }
    }

    /// Table populated from `tokens`, default capacity.
    ///
    /// Duplicates are collapsed.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for token in tokens {
            table.insert(token)?;
        }
        Ok(table)
    }

    /// Add `token`.
    ///
    /// Returns `Ok(true)` if it was added and `Ok(false)` if it was already
    /// present. Re-inserting a present token succeeds even when the table is
    /// full.
    pub fn insert(&mut self, token: Token) -> Result<bool, TableError> {
        if self.tokens.contains(&token) {
            return Ok(false);
        }
        if self.tokens.len() >= self.capacity {
            return Err(TableError::Full { capacity: self.capacity });
        }
        Ok(self.tokens.insert(token))
    }

    /// Remove `token`. Returns whether it was present.
    pub fn remove(&mut self, token: &Token) -> bool {
        self.tokens.remove(token)
    }

    /// Number of tokens held.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if no tokens are held.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Maximum number of tokens.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over held tokens in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorizationTable for TokenTable {
    fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }
}

/// Concurrently readable table updated by read-copy-update.
///
/// Cheap to share behind an `Arc` between packet-processing threads and a
/// control plane.
#[derive(Debug)]
pub struct SharedTable {
    current: RwLock<Arc<TokenTable>>,
}

impl SharedTable {
    /// Shared handle over `table`.
    pub fn new(table: TokenTable) -> Self {
        Self { current: RwLock::new(Arc::new(table)) }
    }

    /// The currently published table.
    ///
    /// The snapshot is immutable; later updates do not affect it.
    pub fn snapshot(&self) -> Arc<TokenTable> {
        Arc::clone(&self.current.read())
    }

    /// Insert `token` and publish the result.
    ///
    /// Same return contract as [`TokenTable::insert`]. Nothing is published
    /// if the token was already present or the table is full.
    pub fn insert(&self, token: Token) -> Result<bool, TableError> {
        let current = self.current.upgradable_read();
        if current.contains(&token) {
            return Ok(false);
        }

        let mut next = TokenTable::clone(&current);
        next.insert(token)?;
        let len = next.len();
        *RwLockUpgradableReadGuard::upgrade(current) = Arc::new(next);

        tracing::trace!(%token, len, "token inserted");
        Ok(true)
    }

    /// Remove `token` and publish the result. Returns whether it was present.
    pub fn remove(&self, token: &Token) -> bool {
        let current = self.current.upgradable_read();
        if !current.contains(token) {
            return false;
        }

        let mut next = TokenTable::clone(&current);
        next.remove(token);
        let len = next.len();
        *RwLockUpgradableReadGuard::upgrade(current) = Arc::new(next);

        tracing::trace!(%token, len, "token removed");
        true
    }

    /// Publish `table` in place of the current contents.
    pub fn replace(&self, table: TokenTable) {
        let len = table.len();
        *self.current.write() = Arc::new(table);
        tracing::trace!(len, "token table replaced");
    }

    /// Number of tokens in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// True if the current snapshot holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}

impl Default for SharedTable {
    fn default() -> Self {
        Self::new(TokenTable::new())
    }
}

impl AuthorizationTable for SharedTable {
    fn contains(&self, token: &Token) -> bool {
        self.current.read().contains(token)
    }
}

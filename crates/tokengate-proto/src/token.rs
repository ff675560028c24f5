//! Fixed-width tokens and their extraction from the payload.
//!
//! A token is the 16 bytes that immediately follow the `Authorization:`
//! prefix, copied verbatim. There is no trimming and no separator check: in
//! `Authorization: abc...` the space is the first token byte.

use std::{fmt, str::FromStr};

use crate::{FrameView, TokenParseError, constants::TOKEN_LEN};

/// Opaque 16-byte credential, compared by exact byte equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    /// Wrap raw token bytes.
    pub const fn new(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw token bytes.
    pub const fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// Lowercase hex encoding (32 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; TOKEN_LEN]> for Token {
    fn from(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.to_hex())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Token {
    type Err = TokenParseError;

    /// Parse 16 raw bytes (the form carried on the wire) or 32 hex characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            TOKEN_LEN => {
                let mut bytes = [0u8; TOKEN_LEN];
                bytes.copy_from_slice(s.as_bytes());
                Ok(Self(bytes))
            },
            len if len == TOKEN_LEN * 2 => {
                let mut bytes = [0u8; TOKEN_LEN];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            },
            len => Err(TokenParseError::InvalidLength { len }),
        }
    }
}

/// Copy the token starting at frame offset `at`.
///
/// Returns `None` if fewer than [`TOKEN_LEN`] bytes remain.
pub fn extract(view: &FrameView<'_>, at: usize) -> Option<Token> {
    view.array::<TOKEN_LEN>(at).map(Token)
}

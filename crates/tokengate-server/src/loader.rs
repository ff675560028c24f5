//! Token and frame file parsing.
//!
//! Both formats are line oriented. Blank lines and lines starting with `#`
//! are ignored and surrounding whitespace is trimmed, so a token whose first
//! or last byte is whitespace must be written as hex. Errors name the 1-based
//! line they came from.

use std::{fs, path::Path};

use tokengate_core::TokenTable;
use tokengate_proto::Token;

use crate::ServerError;

fn entries(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn read(path: &Path) -> Result<String, ServerError> {
    fs::read_to_string(path).map_err(|source| ServerError::Read { path: path.to_path_buf(), source })
}

/// Build a table of at most `capacity` tokens from token file text.
pub fn parse_tokens(text: &str, capacity: usize) -> Result<TokenTable, ServerError> {
    let mut table = TokenTable::with_capacity(capacity);
    for (line, entry) in entries(text) {
        let token: Token =
            entry.parse().map_err(|source| ServerError::InvalidToken { line, source })?;
        if !table.insert(token).map_err(|source| ServerError::TableFull { line, source })? {
            tracing::warn!(line, "duplicate token ignored");
        }
    }
    Ok(table)
}

/// Read and parse a token file.
pub fn load_tokens(path: &Path, capacity: usize) -> Result<TokenTable, ServerError> {
    let table = parse_tokens(&read(path)?, capacity)?;
    tracing::info!(path = %path.display(), tokens = table.len(), capacity, "tokens loaded");
    Ok(table)
}

/// Decode one hex frame. Whitespace between digits is ignored.
pub fn parse_frame(hex_text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = hex_text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(digits)
}

/// Decode every frame in frame file text.
pub fn parse_frames(text: &str) -> Result<Vec<Vec<u8>>, ServerError> {
    entries(text)
        .map(|(line, entry)| {
            parse_frame(entry).map_err(|source| ServerError::InvalidFrame { line, source })
        })
        .collect()
}

/// Read and parse a frame file.
pub fn load_frames(path: &Path) -> Result<Vec<Vec<u8>>, ServerError> {
    let frames = parse_frames(&read(path)?)?;
    tracing::info!(path = %path.display(), frames = frames.len(), "frames loaded");
    Ok(frames)
}

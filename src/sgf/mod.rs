//! SGF decoder for Go game records.
//!
//! This module provides [`SgfParser`] to decode SGF collections into
//! [`GameTree`]s, and the root normalization passes in [`normalize`].
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`load`] - decodes a byte buffer, e.g. file or clipboard content
//! * [`load_with`] - decodes a byte buffer with a configured [`SgfParser`]
//! * [`parse_file`] - reads and decodes a file
//!
//! # Full API
//! For more control, configure an [`SgfParser`]:
//! * [`SgfParser::load`] - decode a buffer
//! * [`SgfParser::parse_all`] - decode all games from a [`ByteParser`]
//! * [`SgfParser::parse_tree`] - decode a single game
//!
//! # Collections
//! A buffer may hold several games back to back. Decoding stops at the first
//! game that fails: if it is the first one, its error is returned; otherwise
//! the games decoded so far are returned and the rest is treated as trailing
//! garbage.
//!
//! [`ByteParser`]: crate::parser::ByteParser

mod defs;
pub mod normalize;
mod parser;

pub use self::defs::{CANONICAL_CHARSET, DEFAULT_MAX_DEPTH};
pub use self::parser::SgfParser;

use crate::model::GameTree;
use crate::parser::ParsingError;
use std::fs;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Decodes an SGF buffer using default settings.
///
/// # Arguments
/// * `buf` - Raw bytes of an SGF collection; a leading UTF-8 BOM is skipped
///
/// # Returns
/// * `Vec<GameTree>` - One or more games, roots normalized
/// * [`ParsingError`] - If no game could be decoded
///
/// # Example
/// ```
/// use sgftree::sgf;
///
/// let games = sgf::load(b"(;GM[1]FF[4]SZ[19];B[pd];W[dd])").unwrap();
/// assert_eq!(games.len(), 1);
/// assert_eq!(games[0].root().get("CA"), Some("UTF-8"));
/// ```
pub fn load(buf: &[u8]) -> Result<Vec<GameTree>, ParsingError> {
    SgfParser::new().load(buf)
}

/// Decodes an SGF buffer with a configured parser.
///
/// Same as [`SgfParser::load`]; handy when a parser is passed around as configuration.
///
/// # Example
/// ```
/// use sgftree::sgf::{self, SgfParser};
///
/// let lax = SgfParser::new().with_lax_reading(true);
/// let games = sgf::load_with(b"(;GM[1]?;B[pd])", &lax).unwrap();
/// assert_eq!(games[0].num_nodes(), 2);
/// ```
pub fn load_with(buf: &[u8], parser: &SgfParser) -> Result<Vec<GameTree>, ParsingError> {
    parser.load(buf)
}

/// Reads a file and decodes it using default settings.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<GameTree>` - One or more games, roots normalized
/// * [`ParsingError`] - If reading fails or no game could be decoded
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<GameTree>, ParsingError> {
    let bytes = fs::read(path)?;
    load(&bytes)
}

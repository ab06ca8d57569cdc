//! SGF format constants.
//!
//! This module contains the grammar bytes of SGF and defaults used by the decoder.

/// UTF-8 byte-order mark, skipped at the start of a buffer
pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Opens a game tree or a variation "("
pub(crate) const TREE_OPEN: u8 = b'(';

/// Closes a game tree or a variation ")"
pub(crate) const TREE_CLOSE: u8 = b')';

/// Starts a node ";"
pub(crate) const NODE_START: u8 = b';';

/// Opens a property value "["
pub(crate) const VALUE_OPEN: u8 = b'[';

/// Closes a property value "]"
pub(crate) const VALUE_CLOSE: u8 = b']';

/// Escapes the next byte inside a value "\"
pub(crate) const ESCAPE: u8 = b'\\';

/// Fewer remaining bytes than this cannot hold another game ("(;)")
pub(crate) const MIN_TREE_LENGTH: usize = 3;

/// Default maximum nesting of variations
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Charset every decoded game is labelled with, whatever its file declared
pub const CANONICAL_CHARSET: &str = "UTF-8";

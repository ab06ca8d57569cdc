//! Sgftree is a library to decode Go game records from SGF files.
//!
//! This crate decodes SGF (Smart Game Format) text into a navigable game
//! tree. Core functionality provided:
//! - SGF decoding: collections of one or more games, tolerant of the
//!   malformed output of legacy SGF writers.
//! - Charsets: values are decoded in the charset the file declares in its
//!   `CA` property, restarting the decode once if needed.
//! - Tree model: [GameTree] uses the arena pattern, so nodes refer to parents
//!   and children by index only. See [crate::model] for more details.
//! - Normalization: charset label, quarter-point komi and white-first games
//!   are rewritten to a single convention, see [crate::sgf::normalize].
//! - Configurability: lax reading, maximum variation depth, strictness for
//!   broken trailing games, see [SgfParser].
//!
//! Limitations:
//! - No SGF writing
//! - No move legality checks or scoring
//!
//! # Usage patterns
//! 1. [load_sgf] and [load_sgf_file] decode with default settings.
//! 2. Configure an [SgfParser] for full control.
//!
//! ## Example Default Configuration
//!
//! ```
//! use sgftree::load_sgf;
//!
//! let games = load_sgf(b"(;GM[1]SZ[19];B[pd](;W[dd])(;W[dp]))").unwrap();
//! let tree = &games[0];
//! let black = tree.main_child(tree.root_index()).unwrap();
//! assert_eq!(tree.children(black).len(), 2);
//! ```
//!
//! ## Example Parser Configuration
//!
//! ```
//! use sgftree::SgfParser;
//!
//! let games = SgfParser::new()
//!     .with_lax_reading(true)
//!     .with_max_depth(64)
//!     .load(b"(;GM[1]@SZ[9];B[ee])")?;
//! assert_eq!(games[0].board_size(), (9, 9));
//! # Ok::<(), sgftree::ParsingError>(())
//! ```

pub mod model;
pub mod parser;
pub mod sgf;

pub use crate::model::GameTree;
pub use crate::parser::ParsingError;
pub use crate::sgf::SgfParser;
use std::path::Path;

// ============================================================================
// Quick SGF API
// ============================================================================
/// Decodes an SGF buffer using default settings,
/// returning its games with normalized roots.
///
/// See [`sgf::load`] for full documentation.
pub fn load_sgf(buf: &[u8]) -> Result<Vec<GameTree>, ParsingError> {
    sgf::load(buf)
}

/// Reads and decodes an SGF file using default settings.
///
/// See [`sgf::parse_file`] for full documentation.
pub fn load_sgf_file<P: AsRef<Path>>(path: P) -> Result<Vec<GameTree>, ParsingError> {
    sgf::parse_file(path)
}

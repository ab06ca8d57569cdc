//! Error types for the SGF decoder.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while decoding SGF records. Every error is
//! recoverable; the decoder never panics on malformed input.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while decoding SGF.
#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum ParsingErrorType {
    /// Reading the input failed (file loader only)
    #[error("IO error - {0}")]
    Io(String),
    /// Buffer contained no parseable game tree
    #[error("Found no game")]
    EmptyCollection,
    /// Byte violates the grammar (strict reading)
    #[error("Unexpected byte {}", describe_byte(.0))]
    UnexpectedByte(u8),
    /// Node declares more than one move
    #[error("Multiple moves in node")]
    DuplicateMove,
    /// Input ended before the closing `)` of a tree
    #[error("Reached end of input inside a game tree")]
    UnterminatedTree,
    /// `)` without any node opened in the current tree
    #[error("Game tree closed before any node was opened")]
    DanglingClose,
    /// `[` without a preceding property identifier
    #[error("Value started with [ but property identifier was empty")]
    EmptyKey,
    /// Subtree nesting deeper than the configured maximum
    #[error("Variation nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),
    /// Bytes of a value not valid under the active encoding
    #[error("Value is not valid {encoding}")]
    Decode {
        /// Name of the encoding that failed
        encoding: String,
    },
}

fn describe_byte(b: &u8) -> String {
    let b = *b;
    if b.is_ascii_graphic() {
        format!("'{}'", b as char)
    } else {
        format!("0x{b:02X}")
    }
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedByte
    pub fn unexpected_byte<S: ByteSource>(byte: u8, parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedByte(byte), parser)
    }

    /// Convenience constructor for DuplicateMove
    pub fn duplicate_move<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::DuplicateMove, parser)
    }

    /// Convenience constructor for UnterminatedTree
    pub fn unterminated_tree<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnterminatedTree, parser)
    }

    /// Convenience constructor for DanglingClose
    pub fn dangling_close<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::DanglingClose, parser)
    }

    /// Convenience constructor for EmptyKey
    pub fn empty_key<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::EmptyKey, parser)
    }

    /// Convenience constructor for DepthExceeded
    pub fn depth_exceeded<S: ByteSource>(max_depth: usize, parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::DepthExceeded(max_depth), parser)
    }

    /// Re-anchors an error raised without context at the current parser position
    pub fn located_at<S: ByteSource>(self, parser: &ByteParser<S>) -> Self {
        Self::from_parser(self.kind, parser)
    }

    /// Create a ParsingError without parser context
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SGF load error: {}", self.kind)?;

        // Position is meaningless for errors raised outside the scan
        if !matches!(self.kind, ParsingErrorType::Io(_)) {
            write!(f, " at position {}", self.position)?;
        }

        if !self.context.is_empty() {
            write!(f, "\n  Context (next {} bytes): {}", self.context.len(), self.context)?;
        }

        Ok(())
    }
}

impl Error for ParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::without_context(ParsingErrorType::Io(err.to_string()))
    }
}

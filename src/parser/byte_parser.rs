//! Low-level byte-by-byte parser.
//!
//! This module provides [ByteParser], a cursor over a [ByteSource] with support
//! for peeking, consuming, seeking and context extraction for error reporting.
//! It is the foundation of the SGF decoder, which scans its input byte by byte.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming and seeking.
///
/// [ByteParser] makes no assumption on the text encoding of its input;
/// it hands out raw bytes. Decoding to text is done later by a
/// [ByteAccumulator](crate::parser::ByteAccumulator).
///
/// # Example
/// ```
/// use sgftree::parser::ByteParser;
///
/// let mut parser = ByteParser::for_bytes(b"  (;B[pd])");
/// parser.skip_whitespace();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.peek(), Some(b';'));
/// assert_eq!(parser.position(), 3);
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl<'a> ByteParser<InMemoryByteSource<'a>> {
    /// Creates a new `ByteParser` over a borrowed byte slice.
    ///
    /// # Arguments
    /// * `input` - The byte slice to parse
    pub fn for_bytes(input: &'a [u8]) -> Self {
        Self::new(InMemoryByteSource::new(input))
    }

    /// Creates a new `ByteParser` over the bytes of a string.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &'a str) -> Self {
        Self::for_bytes(input.as_bytes())
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    ///
    /// # Arguments
    /// * `source` - The byte source to parse
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace and control bytes,
    /// i.e. every byte `<= b' '`.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if is_blank(b) {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Consumes the current byte if it equals `ch` (exact match).
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they equal the given byte sequence.
    ///
    /// # Returns
    /// `true` if the sequence was matched and consumed, `false` otherwise
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if self.source.peek_slice(sequence.len()) != sequence {
            return false;
        }

        for _ in 0..sequence.len() {
            self.next_byte();
        }

        true
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the number of bytes left to consume.
    pub fn remaining(&self) -> usize {
        self.source.remaining()
    }

    /// Returns the current parser position in the input.
    ///
    /// Useful for error messages and tracking parser state.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Sets the position in the byte stream.
    ///
    /// # Arguments
    /// * `pos` - The byte offset to seek to
    pub fn set_position(&mut self, pos: usize) {
        self.source.set_position(pos);
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }
}

/// Whether `b` is insignificant whitespace (any ASCII control byte or space).
#[inline(always)]
pub(crate) fn is_blank(b: u8) -> bool {
    b <= b' '
}

//! Byte source abstractions for parser.
//!
//! This module provides the [ByteSource] trait and [InMemoryByteSource], a
//! source over a borrowed byte slice. SGF decoding needs random access
//! (an encoding restart rewinds to the start of a game), so every source
//! supports [ByteSource::set_position].

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Trait defining the interface for byte sources used by [ByteParser](crate::parser::ByteParser).
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns the current position in the byte stream.
    fn position(&self) -> usize;

    /// Sets the position in the byte stream.
    ///
    /// # Arguments
    /// * `pos` - The byte offset to seek to; clamped to the end of data
    fn set_position(&mut self, pos: usize);

    /// Returns a slice of up to `k` bytes from the current position without allocating.
    fn peek_slice(&self, k: usize) -> &[u8];

    /// Returns the number of bytes not yet consumed.
    fn remaining(&self) -> usize;

    /// Check if at end of data.
    fn is_eof(&self) -> bool {
        self.remaining() == 0
    }
}

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source over a borrowed slice.
///
/// SGF records are small and always fully materialized by the caller,
/// so this is the only source the decoder needs.
pub struct InMemoryByteSource<'a> {
    /// The byte data being parsed
    input: &'a [u8],
    /// Current position in the byte slice
    pos: usize,
}

impl<'a> InMemoryByteSource<'a> {
    /// Creates a new in-memory byte source positioned at the first byte.
    ///
    /// # Arguments
    /// * `input` - The bytes to parse
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }
}

impl ByteSource for InMemoryByteSource<'_> {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    #[inline(always)]
    fn peek_slice(&self, k: usize) -> &[u8] {
        let end = self.pos.saturating_add(k).min(self.input.len());
        &self.input[self.pos..end]
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_position_is_clamped() {
        let mut source = InMemoryByteSource::new(b"(;)");
        source.set_position(10);
        assert!(source.is_eof());
        assert_eq!(source.position(), 3);
        assert_eq!(source.peek_slice(4), b"");
    }

    #[test]
    fn test_remaining_tracks_consumption() {
        let mut source = InMemoryByteSource::new(b"(;B[aa])");
        assert_eq!(source.remaining(), 8);
        source.next_byte();
        source.next_byte();
        assert_eq!(source.remaining(), 6);
        assert_eq!(source.peek(), Some(b'B'));
    }
}

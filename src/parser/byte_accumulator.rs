//! Append-only byte buffer bound to a text encoding.
//!
//! SGF values are scanned byte by byte, but the text encoding of a record is
//! only known once its `CA` property has been read. [ByteAccumulator] therefore
//! collects raw bytes and only decodes them when asked via [ByteAccumulator::as_text].

use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use encoding_rs::{Encoding, UTF_8};

/// Default capacity; most SGF values are short coordinates like `pd`.
const DEFAULT_CAPACITY: usize = 16;

// =#========================================================================#=
// BYTE ACCUMULATOR
// =#========================================================================#=
/// Growable buffer of raw input bytes with a fixed encoding.
///
/// # Invariants
/// - Holds raw input bytes only, never decoded text
/// - The encoding is fixed at construction; [reset](ByteAccumulator::reset) keeps it
///
/// # Example
/// ```
/// use sgftree::parser::ByteAccumulator;
///
/// let mut value = ByteAccumulator::for_label("ISO-8859-1").unwrap();
/// for &b in b"caf\xE9" {
///     value.push(b);
/// }
/// assert_eq!(value.as_text().unwrap(), "café");
/// ```
#[derive(Debug, Clone)]
pub struct ByteAccumulator {
    bytes: Vec<u8>,
    encoding: &'static Encoding,
}

impl ByteAccumulator {
    /// Creates an empty accumulator decoding with `encoding`.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            bytes: Vec::with_capacity(DEFAULT_CAPACITY),
            encoding,
        }
    }

    /// Creates an empty accumulator for an encoding given by its label,
    /// e.g. `"UTF-8"`, `"GB2312"` or `"Shift_JIS"`.
    ///
    /// # Errors
    /// [ParsingErrorType::Decode] if no decoder exists for `label`.
    pub fn for_label(label: &str) -> Result<Self, ParsingError> {
        lookup_encoding(label).map(Self::new).ok_or_else(|| {
            ParsingError::without_context(ParsingErrorType::Decode {
                encoding: label.to_string(),
            })
        })
    }

    /// Appends one raw byte.
    #[inline(always)]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Empties the buffer in place; the encoding is retained.
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Number of accumulated bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no byte has been pushed since construction or the last reset.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The accumulated raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The bound encoding.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Canonical name of the bound encoding, e.g. `"UTF-8"`.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decodes the accumulated bytes with the bound encoding.
    ///
    /// Decoding is strict: no BOM sniffing and no replacement characters.
    ///
    /// # Errors
    /// [ParsingErrorType::Decode] if the bytes are malformed under the encoding.
    pub fn as_text(&self) -> Result<String, ParsingError> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(&self.bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| {
                ParsingError::without_context(ParsingErrorType::Decode {
                    encoding: self.encoding.name().to_string(),
                })
            })
    }
}

impl Default for ByteAccumulator {
    /// Empty UTF-8 accumulator.
    fn default() -> Self {
        Self::new(UTF_8)
    }
}

/// Whether a decoder can be constructed for the encoding `label`,
/// independent of any byte content.
///
/// Labels are matched as in the WHATWG Encoding Standard: case-insensitive,
/// surrounding whitespace ignored, with the usual aliases (`utf8`, `latin1`, ...).
pub fn encoding_supported(label: &str) -> bool {
    lookup_encoding(label).is_some()
}

/// Resolves an encoding label to its decoder.
pub(crate) fn lookup_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

//! Basic low-level byte parser functionality.
//!
//! This module provides the byte cursor used by the SGF decoder, the
//! encoding-aware [ByteAccumulator] that turns raw value bytes into text,
//! and the [ParsingError] type shared by the whole crate.

pub mod byte_accumulator;
pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;

pub use byte_accumulator::{ByteAccumulator, encoding_supported};
pub use byte_parser::ByteParser;
pub use byte_source::{ByteSource, InMemoryByteSource};
pub use parsing_error::{ParsingError, ParsingErrorType};

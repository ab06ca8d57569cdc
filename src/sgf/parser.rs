//! Structs and logic to decode SGF collections.
//!
//! This module provides the [SgfParser] struct, a configurable
//! recursive-descent decoder turning raw bytes into [GameTree]s.

use crate::model::{GameTree, NodeIndex, Property};
use crate::parser::byte_accumulator::{ByteAccumulator, encoding_supported, lookup_encoding};
use crate::parser::byte_parser::{ByteParser, is_blank};
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::sgf::defs::{
    DEFAULT_MAX_DEPTH, ESCAPE, MIN_TREE_LENGTH, NODE_START, TREE_CLOSE, TREE_OPEN, UTF8_BOM,
    VALUE_CLOSE, VALUE_OPEN,
};
use crate::sgf::normalize::normalize_root;
use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, trace, warn};

// =#========================================================================#=
// SGF PARSER
// =#========================================================================$=
/// Parser (configuration) for SGF collections.
///
/// # Configuration
/// * [`with_lax_reading(lax)`](Self::with_lax_reading)
///     - Skips bytes that violate the grammar instead of failing
///       (before a tree opens, or where a property identifier is expected).
/// * [`with_max_depth(depth)`](Self::with_max_depth)
///     - Maximum nesting of variations; deeper input fails with
///       [ParsingErrorType::DepthExceeded].
/// * [`with_strict_collection(strict)`](Self::with_strict_collection)
///     - Fails on a broken second or later game instead of returning the
///       games decoded before it.
/// * [`with_default_encoding(encoding)`](Self::with_default_encoding)
///     - Encoding assumed until a `CA` property says otherwise (UTF-8).
///
/// # Parsing
/// * [`load`](Self::load) - Decode a whole buffer into normalized games
/// * [`parse_all`](Self::parse_all) - Decode all games from a [ByteParser]
/// * [`parse_tree`](Self::parse_tree) - Decode one game, without normalization
///
/// # Format
/// * `Collection ::= GameTree+`
/// * `GameTree ::= "(" Sequence GameTree* ")"`
/// * `Sequence ::= Node*`
/// * `Node ::= ";" Property*`
/// * `Property ::= Key Value+`
/// * `Key ::= UPPERCASE_LETTER+`
/// * `Value ::= "[" (EscapedChar | OrdinaryChar)* "]"`
///
/// Whitespace and lowercase letters outside values are ignored, so old-style
/// identifiers like `AddBlack` read as `AB`. A `\` inside a value takes the
/// next byte literally.
///
/// # Encoding
/// Decoding starts in UTF-8. When the first `CA` value of the outermost tree
/// names another encoding with an available decoder, the game is decoded again
/// from its start in that encoding; this happens at most once per game.
///
/// # Example
/// ```
/// use sgftree::sgf::SgfParser;
///
/// let games = SgfParser::new()
///     .with_lax_reading(true)
///     .load(b"(;GM[1]SZ[19];B[pd];W[dd])")
///     .unwrap();
/// let tree = &games[0];
/// assert_eq!(tree.main_line().count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SgfParser {
    lax_reading: bool,
    max_depth: usize,
    strict_collection: bool,
    default_encoding: &'static Encoding,
}

/// How the scan of one (sub)tree ended.
enum TreeScan {
    /// Tree closed by `)`; holds the index of its first node
    Closed(NodeIndex),
    /// Outermost tree declared another charset; decode again from the start
    Restart(&'static Encoding),
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl SgfParser {
    /// Creates a new [SgfParser] with default settings:
    /// - strict reading
    /// - maximum variation depth [DEFAULT_MAX_DEPTH]
    /// - broken trailing games are dropped
    /// - UTF-8 until a `CA` says otherwise
    pub fn new() -> Self {
        Self {
            lax_reading: false,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_collection: false,
            default_encoding: UTF_8,
        }
    }

    /// Configures whether bytes violating the grammar are skipped (`true`)
    /// or reported as [ParsingErrorType::UnexpectedByte] (`false`).
    pub fn with_lax_reading(mut self, lax_reading: bool) -> Self {
        self.lax_reading = lax_reading;
        self
    }

    /// Sets the maximum nesting depth of variations.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Configures whether a broken second or later game fails the whole load.
    pub fn with_strict_collection(mut self, strict_collection: bool) -> Self {
        self.strict_collection = strict_collection;
        self
    }

    /// Sets the encoding assumed for games without (supported) `CA`.
    pub fn with_default_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    pub fn is_lax_reading(&self) -> bool {
        self.lax_reading
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for SgfParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl SgfParser {
    /// Decodes all games of a buffer, skipping a leading UTF-8 byte-order mark.
    ///
    /// # Returns
    /// * `Ok(Vec<GameTree>)` - At least one game, each with a normalized root
    /// * `Err(ParsingError)` - If the first game fails to decode, or if the
    ///   buffer holds no game ([ParsingErrorType::EmptyCollection])
    pub fn load(&self, buf: &[u8]) -> Result<Vec<GameTree>, ParsingError> {
        let mut parser = ByteParser::for_bytes(buf);
        parser.consume_if_sequence(UTF8_BOM);
        self.parse_all(&mut parser)
    }

    /// Decodes games from the current position until the input is exhausted.
    ///
    /// A game failing to decode after at least one success ends the collection
    /// and is dropped, unless [strict collection](Self::with_strict_collection)
    /// is configured. Roots are normalized, see [crate::sgf::normalize].
    pub fn parse_all<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
    ) -> Result<Vec<GameTree>, ParsingError> {
        let mut trees = Vec::new();

        loop {
            parser.skip_whitespace();
            if parser.remaining() < MIN_TREE_LENGTH {
                break;
            }

            let start = parser.position();
            match self.parse_tree(parser) {
                Ok(tree) => {
                    trace!(
                        nodes = tree.num_nodes(),
                        bytes = parser.position() - start,
                        "Decoded game"
                    );
                    trees.push(tree);
                }
                Err(err) if !trees.is_empty() && !self.strict_collection => {
                    debug!(
                        games = trees.len(),
                        error = %err,
                        "Dropping trailing data after last complete game"
                    );
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if trees.is_empty() {
            return Err(ParsingError::from_parser(
                ParsingErrorType::EmptyCollection,
                parser,
            ));
        }

        for tree in &mut trees {
            normalize_root(tree);
        }

        Ok(trees)
    }

    /// Decodes a single game starting at the current position.
    ///
    /// On success the parser is positioned right after the game's closing `)`.
    /// The root is returned as found in the input, without normalization.
    pub fn parse_tree<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
    ) -> Result<GameTree, ParsingError> {
        self.parse_game(parser, self.default_encoding, true)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl SgfParser {
    /// Decodes one game in `encoding`, restarting once in the encoding declared
    /// by `CA` if `allow_restart` is set.
    fn parse_game<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
        encoding: &'static Encoding,
        allow_restart: bool,
    ) -> Result<GameTree, ParsingError> {
        let start = parser.position();
        let mut tree = GameTree::empty();

        match self.scan_game(parser, &mut tree, encoding, allow_restart)? {
            TreeScan::Closed(_) => Ok(tree),
            TreeScan::Restart(declared) => {
                debug!(
                    from = encoding.name(),
                    to = declared.name(),
                    "Restarting game with declared charset"
                );
                parser.set_position(start);
                self.parse_game(parser, declared, false)
            }
        }
    }

    /// Scans one game `( ... )`, adding its nodes to `tree`.
    ///
    /// Variations are tracked on an explicit stack of [OpenTree]s; nesting
    /// depth never grows the call stack.
    /// `allow_restart` permits returning [TreeScan::Restart], which only the
    /// outermost tree may trigger.
    fn scan_game<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
        tree: &mut GameTree,
        encoding: &'static Encoding,
        allow_restart: bool,
    ) -> Result<TreeScan, ParsingError> {
        self.skip_to_tree_open(parser)?;

        let mut open_trees = vec![OpenTree::new(None)];
        let mut value = ByteAccumulator::new(encoding);

        while let Some(c) = parser.next_byte() {
            let depth = open_trees.len() - 1;
            let Some(scan) = open_trees.last_mut() else {
                break;
            };

            match c {
                _ if is_blank(c) || c.is_ascii_lowercase() => {}

                VALUE_OPEN => {
                    // A tree with "(" but no ";" before its first property is tolerated
                    let current = match scan.node {
                        Some(current) => current,
                        None => {
                            let first = tree.new_node(scan.parent);
                            scan.root = Some(first);
                            scan.node = Some(first);
                            first
                        }
                    };

                    scan.key_complete = true;
                    if scan.key.is_empty() {
                        return Err(ParsingError::empty_key(parser));
                    }
                    let key_string = scan.key.as_text().map_err(|e| e.located_at(parser))?;

                    value.reset();
                    scan_value(parser, &mut value)?;
                    let value_string = value.as_text().map_err(|e| e.located_at(parser))?;

                    if Property::is_move_key(&key_string)
                        && (tree[current].has(Property::Black) || tree[current].has(Property::White))
                    {
                        return Err(ParsingError::duplicate_move(parser));
                    }

                    let first_charset = key_string == Property::Charset.as_str()
                        && !tree[current].has(Property::Charset);
                    tree[current].add_value(key_string, value_string);

                    if first_charset && depth == 0 && allow_restart {
                        let declared = tree[current].charset().unwrap_or_default();
                        if let Some(declared) = declared_encoding(declared, encoding) {
                            return Ok(TreeScan::Restart(declared));
                        }
                    }
                }

                TREE_OPEN => {
                    let Some(current) = scan.node else {
                        return Err(unexpected_byte(c, parser));
                    };
                    if depth + 1 > self.max_depth {
                        parser.set_position(parser.position() - 1);
                        return Err(ParsingError::depth_exceeded(self.max_depth, parser));
                    }
                    open_trees.push(OpenTree::new(Some(current)));
                }

                TREE_CLOSE => {
                    let Some(root) = scan.root else {
                        parser.set_position(parser.position() - 1);
                        return Err(ParsingError::dangling_close(parser));
                    };
                    open_trees.pop();
                    if open_trees.is_empty() {
                        return Ok(TreeScan::Closed(root));
                    }
                    // Variation complete, register it with the node it branches from
                    tree.link_child(root);
                }

                NODE_START => {
                    let next = match scan.node {
                        None => {
                            let first = tree.new_node(scan.parent);
                            scan.root = Some(first);
                            first
                        }
                        Some(current) => {
                            let next = tree.new_node(Some(current));
                            tree.link_child(next);
                            next
                        }
                    };
                    scan.node = Some(next);
                    scan.key.reset();
                    scan.key_complete = false;
                }

                b'A'..=b'Z' => {
                    if scan.key_complete {
                        scan.key.reset();
                        scan.key_complete = false;
                    }
                    scan.key.push(c);
                }

                _ if self.lax_reading => {
                    scan.key.reset();
                    scan.key_complete = false;
                }

                _ => return Err(unexpected_byte(c, parser)),
            }
        }

        Err(ParsingError::unterminated_tree(parser))
    }

    /// Consumes bytes up to and including the `(` opening a game.
    ///
    /// Whitespace and lowercase letters are skipped; any other byte fails
    /// unless reading is lax.
    fn skip_to_tree_open<S: ByteSource>(&self, parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
        while let Some(c) = parser.next_byte() {
            match c {
                TREE_OPEN => return Ok(()),
                _ if is_blank(c) || c.is_ascii_lowercase() || self.lax_reading => {}
                _ => return Err(unexpected_byte(c, parser)),
            }
        }

        Err(ParsingError::unterminated_tree(parser))
    }
}

/// Scan state of one `( ... )` that has been opened but not yet closed.
struct OpenTree {
    /// Node the tree's first node hangs below (`None` for the game itself)
    parent: Option<NodeIndex>,
    /// First node of this tree
    root: Option<NodeIndex>,
    /// Node properties are currently added to
    node: Option<NodeIndex>,
    // Identifiers are A-Z only, so ASCII-compatible UTF-8 is enough
    key: ByteAccumulator,
    key_complete: bool,
}

impl OpenTree {
    fn new(parent: Option<NodeIndex>) -> Self {
        Self {
            parent,
            root: None,
            node: None,
            key: ByteAccumulator::new(UTF_8),
            key_complete: false,
        }
    }
}

/// Reads value bytes up to the closing `]`, which is consumed.
///
/// Expects the opening `[` to be consumed already.
fn scan_value<S: ByteSource>(
    parser: &mut ByteParser<S>,
    value: &mut ByteAccumulator,
) -> Result<(), ParsingError> {
    while let Some(c) = parser.next_byte() {
        match c {
            ESCAPE => match parser.next_byte() {
                Some(escaped) => value.push(escaped),
                None => return Err(ParsingError::unterminated_tree(parser)),
            },
            VALUE_CLOSE => return Ok(()),
            _ => value.push(c),
        }
    }

    Err(ParsingError::unterminated_tree(parser))
}

/// Decides whether a declared charset calls for decoding again.
///
/// # Returns
/// The declared encoding if it has a decoder and differs from `current`.
fn declared_encoding(declared: &str, current: &'static Encoding) -> Option<&'static Encoding> {
    if !encoding_supported(declared) {
        warn!(charset = declared, "While loading SGF, got unsupported CA; keeping {}", current.name());
        return None;
    }

    lookup_encoding(declared).filter(|&declared| declared != current)
}

/// Error for the byte just consumed, located at that byte.
fn unexpected_byte<S: ByteSource>(c: u8, parser: &mut ByteParser<S>) -> ParsingError {
    parser.set_position(parser.position() - 1);
    ParsingError::unexpected_byte(c, parser)
}

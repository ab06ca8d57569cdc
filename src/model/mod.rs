//! Data model for SGF game records.
//!
//! # Tree representation
//! A game record is a [GameTree], which uses the arena pattern to store
//! [Node]s referenced by [NodeIndex]. The root sits at [ROOT_INDEX]; each node
//! knows its parent by index and its children in order, the first child being
//! the main line and later children the variations.
//!
//! # Properties
//! Each node maps property identifiers to one or more string values. The
//! [Property] enum names the identifiers this crate interprets and [Node]
//! offers typed accessors for them ([Node::komi], [Node::board_size],
//! [Node::rules], ...). Every other property is kept verbatim in insertion order.
//!
//! # Moves
//! [Color], [Point] and [Move] decode `B`/`W` values; [GameTree::play]
//! re-derives an existing child for a move instead of duplicating it.

pub mod node;
pub mod property;
pub mod sgf_move;
pub mod tree;

pub use node::Node;
pub use property::{Property, RulesKind};
pub use sgf_move::{Color, Move, Point};
pub use tree::{GameTree, NodeIndex, ROOT_INDEX};

//! Tree module for game record representation.
//!
//! This module provides the core data structures for representing a game record:
//! - `GameTree`: The tree structure using the arena pattern on [Node].
//! - `NodeIndex` is used to index nodes.

use crate::model::node::Node;
use crate::model::property::Property;
use crate::model::sgf_move::{Color, Move};
use std::ops::{Index, IndexMut};

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// The root is always the first node of the arena.
pub const ROOT_INDEX: NodeIndex = 0;

/// Board size assumed when the root carries no (valid) `SZ`.
pub const DEFAULT_BOARD_SIZE: (u8, u8) = (19, 19);

// =#========================================================================#=
// GAME TREE
// =#========================================================================#=
/// A game record represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// A child refers to its parent by index, so there is no shared or cyclic
/// ownership: the tree owns every node.
///
/// # Structure
/// - The root is at [ROOT_INDEX] and has no parent
/// - Children of a node keep insertion order; the first child is the main
///   line, later children are variations
/// - Nodes are only ever appended; an index stays valid for the tree's lifetime
///
/// # Construction
/// [GameTree::new_node] allocates a node without registering it with its parent,
/// [GameTree::link_child] registers it. [GameTree::add_child] does both.
///
/// # Example
/// ```
/// use sgftree::model::{Color, GameTree, Move, Point};
///
/// let mut tree = GameTree::new();
/// let root = tree.root_index();
/// let b = tree.play(root, Color::Black, Move::Play(Point::new(15, 3))).unwrap();
/// let w = tree.play(b, Color::White, Move::Play(Point::new(3, 3))).unwrap();
///
/// // Playing the same move again re-derives the existing child
/// assert_eq!(tree.play(root, Color::Black, Move::Play(Point::new(15, 3))), Some(b));
/// assert_eq!(tree.main_line().collect::<Vec<_>>(), vec![root, b, w]);
/// assert!(tree.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl GameTree {
    /// Creates a tree consisting of a single empty root.
    pub fn new() -> Self {
        GameTree {
            nodes: vec![Node::new(ROOT_INDEX, None)],
        }
    }

    /// *During parsing only*, a tree without any node; the first allocated
    /// node becomes its root.
    pub(crate) fn empty() -> Self {
        GameTree { nodes: Vec::new() }
    }

    /// Allocates a new node, returning its index.
    ///
    /// The node records `parent` but is *not* registered as one of its
    /// children, so a node under construction can be abandoned without
    /// touching the parent. Call [GameTree::link_child] once it is complete.
    ///
    /// # Panics
    /// Panics if `parent` is not a node of this tree.
    pub fn new_node(&mut self, parent: Option<NodeIndex>) -> NodeIndex {
        if let Some(parent) = parent {
            assert!(parent < self.nodes.len(), "parent {parent} not in tree");
        }
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, parent));
        index
    }

    /// Registers `child` as the last child of its parent.
    ///
    /// Does nothing for a node without parent or one that is already linked.
    pub fn link_child(&mut self, child: NodeIndex) {
        let Some(parent) = self.nodes[child].parent_index() else {
            return;
        };
        if !self.nodes[parent].children().contains(&child) {
            self.nodes[parent].push_child(child);
        }
    }

    /// Allocates a new node and appends it to the children of `parent`.
    pub fn add_child(&mut self, parent: NodeIndex) -> NodeIndex {
        let child = self.new_node(Some(parent));
        self.link_child(child);
        child
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeIndex {
        ROOT_INDEX
    }

    /// Returns a reference to the root.
    ///
    /// # Panics
    /// Panics on a tree that is still being parsed and has no node yet.
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT_INDEX]
    }

    /// Returns a mutable reference to the root.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.nodes[ROOT_INDEX]
    }

    /// Returns the node at `index`, or `None` if out of bounds.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns the node at `index` mutably, or `None` if out of bounds.
    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Returns an iterator over all nodes in arena order (root first).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the total number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the parent of `index`, `None` for the root.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self[index].parent_index()
    }

    /// Returns the children of `index`, main line first.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self[index].children()
    }

    /// Returns the main line continuation of `index`.
    pub fn main_child(&self, index: NodeIndex) -> Option<NodeIndex> {
        self[index].main_child()
    }

    /// Board size from the root's `SZ`, defaulting to 19x19.
    pub fn board_size(&self) -> (u8, u8) {
        self.root().board_size().unwrap_or(DEFAULT_BOARD_SIZE)
    }
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Navigation (pub)
// ============================================================================
impl GameTree {
    /// Returns the number of edges between `index` and the root.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).count()
    }

    /// Iterates over the strict ancestors of `index`, parent first.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(index),
        }
    }

    /// Iterates over the main line: the root followed by first children.
    pub fn main_line(&self) -> MainLine<'_> {
        self.main_line_from(ROOT_INDEX)
    }

    /// Iterates over `index` followed by its first children.
    pub fn main_line_from(&self, index: NodeIndex) -> MainLine<'_> {
        MainLine {
            tree: self,
            next: Some(index),
        }
    }

    /// Returns the last node of the main line continuing from `index`.
    pub fn main_line_end(&self, index: NodeIndex) -> NodeIndex {
        self.main_line_from(index).last().unwrap_or(index)
    }

    /// Whether `index` is the first child of its parent, recursively up to the root.
    pub fn is_main_line(&self, index: NodeIndex) -> bool {
        let mut current = index;
        while let Some(parent) = self.parent(current) {
            if self.main_child(parent) != Some(current) {
                return false;
            }
            current = parent;
        }
        true
    }

    /// Returns the nearest ancestor-or-self of `index` that lies on the main line.
    pub fn return_to_main_line(&self, index: NodeIndex) -> NodeIndex {
        // The topmost node that is not a first child decides where we leave the main line
        let mut result = index;
        let mut current = index;
        while let Some(parent) = self.parent(current) {
            if self.main_child(parent) != Some(current) {
                result = parent;
            }
            current = parent;
        }
        result
    }

    /// Returns the rank of `index` among its siblings (0 = main line).
    pub fn variation_rank(&self, index: NodeIndex) -> usize {
        self.parent(index)
            .and_then(|parent| self.children(parent).iter().position(|&c| c == index))
            .unwrap_or(0)
    }
}

// ============================================================================
// Moves (pub)
// ============================================================================
impl GameTree {
    /// Returns the child of `index` that plays exactly `mv` for `color`.
    pub fn find_child_with_move(&self, index: NodeIndex, color: Color, mv: Move) -> Option<NodeIndex> {
        let board_size = self.board_size();
        self.children(index)
            .iter()
            .copied()
            .find(|&child| self[child].plays(color, mv, board_size))
    }

    /// Plays `mv` for `color` after `index`.
    ///
    /// Re-derives the existing child if one already plays this move,
    /// otherwise appends a new variation carrying the move.
    ///
    /// # Returns
    /// Index of the child holding the move, `None` if `mv` has no SGF form
    /// (a coordinate beyond [MAX_BOARD_SIZE](crate::model::sgf_move::MAX_BOARD_SIZE)).
    pub fn play(&mut self, index: NodeIndex, color: Color, mv: Move) -> Option<NodeIndex> {
        if let Some(child) = self.find_child_with_move(index, color, mv) {
            return Some(child);
        }

        let value = mv.to_sgf()?;
        let child = self.add_child(index);
        self[child].set(color.key(), value);
        Some(child)
    }

    /// Color to move after `index`.
    ///
    /// Follows the last move, falling back to `PL` and then to black.
    pub fn next_player(&self, index: NodeIndex) -> Color {
        if let Some(color) = self[index].player_to_move() {
            return color;
        }
        if let Some(color) = self[index].move_color() {
            return color.opposite();
        }
        self.ancestors(index)
            .find_map(|ancestor| {
                let node = &self[ancestor];
                node.move_color()
                    .map(Color::opposite)
                    .or_else(|| node.player_to_move())
            })
            .unwrap_or(Color::Black)
    }

    /// Komi from the root, zero if absent or malformed.
    pub fn komi(&self) -> f64 {
        self.root().komi().unwrap_or(0.0)
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl GameTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - There is a root, without parent
    /// - All node indices match their position in the arena
    /// - All child indices are valid and point back to the correct parent
    /// - Every non-root node is linked exactly once into its parent's children
    /// - No node holds both a black and a white move
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.nodes.first() else {
            return false;
        };
        if root.parent_index().is_some() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index {
                return false;
            }

            if node.has(Property::Black) && node.has(Property::White) {
                return false;
            }

            for &child in node.children() {
                match self.nodes.get(child) {
                    Some(c) if c.parent_index() == Some(index) => {}
                    _ => return false,
                }
            }

            if index != ROOT_INDEX {
                let Some(parent) = node.parent_index() else {
                    return false;
                };
                match self.nodes.get(parent) {
                    Some(p) if p.children().iter().filter(|&&c| c == index).count() == 1 => {}
                    _ => return false,
                }
            }
        }

        true
    }
}

// ============================================================================
// Indexing
// ============================================================================
impl Index<NodeIndex> for GameTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl IndexMut<NodeIndex> for GameTree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator over a node followed by its first children. See [GameTree::main_line].
pub struct MainLine<'a> {
    tree: &'a GameTree,
    next: Option<NodeIndex>,
}

impl Iterator for MainLine<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.main_child(current);
        Some(current)
    }
}

/// Iterator over the strict ancestors of a node. See [GameTree::ancestors].
pub struct Ancestors<'a> {
    tree: &'a GameTree,
    next: Option<NodeIndex>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

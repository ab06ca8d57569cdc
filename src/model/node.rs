//! Node module for game tree representation.

use crate::model::property::{Property, RulesKind};
use crate::model::sgf_move::{Color, MAX_BOARD_SIZE, Move, Point};
use crate::model::tree::NodeIndex;
use indexmap::IndexMap;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// One position of a game record: its properties and its place in the tree.
///
/// Nodes live in the arena of a [GameTree](crate::model::GameTree) and refer to
/// each other by [NodeIndex] only; the parent link is a plain index, never an
/// owning reference.
///
/// # Invariants
/// - `index` is the position of this node in the arena
/// - `children` keep insertion order; the first child is the main line,
///   later children are variations in rank order
/// - every registered property has at least one value; an empty string is a
///   valid value (e.g. a pass `B[]`) and distinct from an absent property
/// - properties keep the order in which they were first added
#[derive(PartialEq, Debug, Clone)]
pub struct Node {
    /// Index of this node in the tree arena
    index: NodeIndex,
    /// Index of the parent node; `None` for the root and for detached nodes
    parent: Option<NodeIndex>,
    /// Indices of the child nodes, main line first
    children: Vec<NodeIndex>,
    /// Property identifier -> values
    properties: IndexMap<String, Vec<String>>,
}

impl Node {
    /// Creates a new node without properties and without children.
    ///
    /// The node is *not* registered as a child of `parent`; see
    /// [GameTree::link_child](crate::model::GameTree::link_child).
    pub(crate) fn new(index: NodeIndex, parent: Option<NodeIndex>) -> Self {
        Node {
            index,
            parent,
            children: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Returns the index of this node in the tree arena.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the index of the parent, `None` for the root.
    pub fn parent_index(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the children, main line first.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the main line continuation, i.e. the first child.
    pub fn main_child(&self) -> Option<NodeIndex> {
        self.children.first().copied()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    // ------------------------------------------------------------------------
    // Generic property access
    // ------------------------------------------------------------------------
    /// Appends `value` to the values of `key`, creating the property if absent.
    ///
    /// Repeated identical values are kept, e.g. several `AB` points.
    pub fn add_value<K: AsRef<str>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.as_ref();
        match self.properties.get_mut(key) {
            Some(values) => values.push(value.into()),
            None => {
                self.properties.insert(key.to_string(), vec![value.into()]);
            }
        }
    }

    /// Replaces all values of `key` with the single `value`.
    pub fn set<K: AsRef<str>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.as_ref();
        match self.properties.get_mut(key) {
            Some(values) => {
                values.clear();
                values.push(value.into());
            }
            None => {
                self.properties.insert(key.to_string(), vec![value.into()]);
            }
        }
    }

    /// Removes `key` and returns its values, keeping the order of the others.
    pub fn remove<K: AsRef<str>>(&mut self, key: K) -> Option<Vec<String>> {
        self.properties.shift_remove(key.as_ref())
    }

    /// Returns the first value of `key`.
    pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&str> {
        self.properties
            .get(key.as_ref())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all values of `key`.
    pub fn get_list<K: AsRef<str>>(&self, key: K) -> Option<&[String]> {
        self.properties.get(key.as_ref()).map(Vec::as_slice)
    }

    /// Whether `key` is present (with any value, including the empty one).
    pub fn has<K: AsRef<str>>(&self, key: K) -> bool {
        self.properties.contains_key(key.as_ref())
    }

    /// Property identifiers in the order they were first added.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// All properties with their values, in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.properties
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn num_properties(&self) -> usize {
        self.properties.len()
    }

    // ------------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------------
    /// Returns the color and raw value of the move of this node.
    ///
    /// `None` if there is no `B`/`W`, or if the move property does not hold
    /// exactly one value. The decoder rejects nodes with both `B` and `W`.
    pub fn move_value(&self) -> Option<(Color, &str)> {
        [Color::Black, Color::White].into_iter().find_map(|color| {
            match self.get_list(color.key()) {
                Some([value]) => Some((color, value.as_str())),
                _ => None,
            }
        })
    }

    /// Color of the move of this node, if any.
    pub fn move_color(&self) -> Option<Color> {
        self.move_value().map(|(color, _)| color)
    }

    /// Decodes the move of this node on a board of the given size.
    pub fn move_played(&self, board_size: (u8, u8)) -> Option<(Color, Move)> {
        let (color, value) = self.move_value()?;
        Move::from_sgf(value, board_size).map(|mv| (color, mv))
    }

    /// Whether any `B`/`W` value of this node for `color` denotes `mv`.
    ///
    /// Points are compared by their letters, so a move off the given board
    /// still matches. `board_size` only decides whether `tt` is a pass.
    pub fn plays(&self, color: Color, mv: Move, board_size: (u8, u8)) -> bool {
        let Some(values) = self.get_list(color.key()) else {
            return false;
        };
        values.iter().any(|value| match mv {
            Move::Pass => Move::from_sgf(value, board_size).is_some_and(Move::is_pass),
            Move::Play(point) => Point::from_sgf(value.trim()) == Some(point),
        })
    }

    // ------------------------------------------------------------------------
    // Typed accessors for properties the application interprets
    // ------------------------------------------------------------------------
    /// `KM` as a number.
    pub fn komi(&self) -> Option<f64> {
        self.get(Property::Komi)?.trim().parse().ok()
    }

    /// `SZ` as `(width, height)`, accepting `SZ[19]` and `SZ[19:13]`.
    pub fn board_size(&self) -> Option<(u8, u8)> {
        let value = self.get(Property::Size)?;
        let (width, height) = match value.split_once(':') {
            Some((w, h)) => (w.trim().parse::<u8>().ok()?, h.trim().parse::<u8>().ok()?),
            None => {
                let side = value.trim().parse::<u8>().ok()?;
                (side, side)
            }
        };

        let in_range = |side: u8| (1..=MAX_BOARD_SIZE).contains(&side);
        (in_range(width) && in_range(height)).then_some((width, height))
    }

    /// `RU` as a [RulesKind].
    pub fn rules(&self) -> Option<RulesKind> {
        self.get(Property::Rules).map(RulesKind::from_sgf)
    }

    /// `PL` as a [Color].
    pub fn player_to_move(&self) -> Option<Color> {
        self.get(Property::PlayerToMove).and_then(Color::from_sgf)
    }

    /// `CA`, the declared charset.
    pub fn charset(&self) -> Option<&str> {
        self.get(Property::Charset)
    }

    /// `C`, the comment.
    pub fn comment(&self) -> Option<&str> {
        self.get(Property::Comment)
    }
}

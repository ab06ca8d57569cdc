//! Colors, board points and moves as written in SGF values.
//!
//! SGF encodes a board point as two letters, column first: `a..z` map to
//! 0..25 and `A..Z` to 26..51. A pass is an empty value, or `tt` on boards
//! no larger than 19x19.

use std::fmt;

/// Largest board side on which `tt` still denotes a pass.
const TT_PASS_MAX_SIZE: u8 = 19;

/// Largest board side expressible with SGF point letters.
pub const MAX_BOARD_SIZE: u8 = 52;

// =#========================================================================#=
// COLOR
// =#========================================================================#=
/// Player color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Property identifier of a move by this color (`B` or `W`).
    pub const fn key(self) -> &'static str {
        match self {
            Color::Black => "B",
            Color::White => "W",
        }
    }

    /// The other color.
    pub const fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Parses a color from `B`/`W` (case-insensitive, surrounding whitespace ignored).
    pub fn from_sgf(value: &str) -> Option<Color> {
        match value.trim() {
            "B" | "b" => Some(Color::Black),
            "W" | "w" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =#========================================================================#=
// POINT
// =#========================================================================#=
/// Zero-based board coordinate; `x` is the column, `y` the row from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    pub fn new(x: u8, y: u8) -> Self {
        Point { x, y }
    }

    /// Parses a two-letter SGF point such as `pd`.
    ///
    /// # Returns
    /// `None` unless `value` is exactly two letters.
    pub fn from_sgf(value: &str) -> Option<Point> {
        match value.as_bytes() {
            [x, y] => Some(Point {
                x: letter_to_coordinate(*x)?,
                y: letter_to_coordinate(*y)?,
            }),
            _ => None,
        }
    }

    /// Two-letter SGF form of this point.
    ///
    /// # Returns
    /// `None` if a coordinate is not below [MAX_BOARD_SIZE].
    pub fn to_sgf(self) -> Option<String> {
        let mut s = String::with_capacity(2);
        s.push(coordinate_to_letter(self.x)?);
        s.push(coordinate_to_letter(self.y)?);
        Some(s)
    }

    /// Whether this point lies on a board of the given `(width, height)`.
    pub fn is_on_board(self, board_size: (u8, u8)) -> bool {
        self.x < board_size.0 && self.y < board_size.1
    }
}

fn letter_to_coordinate(b: u8) -> Option<u8> {
    match b {
        b'a'..=b'z' => Some(b - b'a'),
        b'A'..=b'Z' => Some(b - b'A' + 26),
        _ => None,
    }
}

fn coordinate_to_letter(c: u8) -> Option<char> {
    if c >= MAX_BOARD_SIZE {
        return None;
    }
    let letter = if c < 26 {
        (b'a' + c) as char
    } else {
        (b'A' + c - 26) as char
    };
    Some(letter)
}

// =#========================================================================#=
// MOVE
// =#========================================================================#=
/// Content of a `B` or `W` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Pass,
    Play(Point),
}

impl Move {
    /// Decodes a move value for a board of the given `(width, height)`.
    ///
    /// # Returns
    /// `None` if the value is neither a pass nor a point on the board.
    pub fn from_sgf(value: &str, board_size: (u8, u8)) -> Option<Move> {
        let value = value.trim();
        if value.is_empty() {
            return Some(Move::Pass);
        }
        if value == "tt" && board_size.0 <= TT_PASS_MAX_SIZE && board_size.1 <= TT_PASS_MAX_SIZE {
            return Some(Move::Pass);
        }

        Point::from_sgf(value)
            .filter(|p| p.is_on_board(board_size))
            .map(Move::Play)
    }

    /// SGF form of this move; a pass is written as the empty value.
    ///
    /// # Returns
    /// `None` for a point not expressible in SGF, see [Point::to_sgf].
    pub fn to_sgf(self) -> Option<String> {
        match self {
            Move::Pass => Some(String::new()),
            Move::Play(point) => point.to_sgf(),
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }
}

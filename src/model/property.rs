//! Well-known SGF property identifiers and their typed values.
//!
//! Properties are stored generically as identifier -> list of strings on each
//! [Node](crate::model::Node). The [Property] enum names the identifiers this
//! crate interprets, so that `node.get(Property::Komi)` and `node.get("KM")`
//! are interchangeable.

use std::fmt;

// =#========================================================================#=
// PROPERTY
// =#========================================================================#=
/// Property identifiers with a dedicated meaning in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// `B`: black move
    Black,
    /// `W`: white move
    White,
    /// `AB`: added black stones
    AddBlack,
    /// `AW`: added white stones
    AddWhite,
    /// `AE`: cleared points
    AddEmpty,
    /// `PL`: player to move
    PlayerToMove,
    /// `CA`: charset of the record
    Charset,
    /// `KM`: komi
    Komi,
    /// `RU`: rule set
    Rules,
    /// `SZ`: board size
    Size,
    /// `HA`: handicap stones
    Handicap,
    /// `C`: comment
    Comment,
    /// `GM`: game type, 1 for Go
    GameType,
    /// `FF`: file format version
    FileFormat,
    /// `PB`: black player name
    PlayerBlack,
    /// `PW`: white player name
    PlayerWhite,
    /// `RE`: result
    Result,
}

impl Property {
    /// All well-known properties.
    pub const ALL: [Property; 17] = [
        Property::Black,
        Property::White,
        Property::AddBlack,
        Property::AddWhite,
        Property::AddEmpty,
        Property::PlayerToMove,
        Property::Charset,
        Property::Komi,
        Property::Rules,
        Property::Size,
        Property::Handicap,
        Property::Comment,
        Property::GameType,
        Property::FileFormat,
        Property::PlayerBlack,
        Property::PlayerWhite,
        Property::Result,
    ];

    /// SGF identifier of this property.
    pub const fn as_str(self) -> &'static str {
        match self {
            Property::Black => "B",
            Property::White => "W",
            Property::AddBlack => "AB",
            Property::AddWhite => "AW",
            Property::AddEmpty => "AE",
            Property::PlayerToMove => "PL",
            Property::Charset => "CA",
            Property::Komi => "KM",
            Property::Rules => "RU",
            Property::Size => "SZ",
            Property::Handicap => "HA",
            Property::Comment => "C",
            Property::GameType => "GM",
            Property::FileFormat => "FF",
            Property::PlayerBlack => "PB",
            Property::PlayerWhite => "PW",
            Property::Result => "RE",
        }
    }

    /// Looks up a well-known property by its identifier.
    pub fn from_key(key: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.as_str() == key)
    }

    /// Whether `key` is a move identifier (`B` or `W`).
    pub fn is_move_key(key: &str) -> bool {
        matches!(Property::from_key(key), Some(Property::Black | Property::White))
    }
}

impl AsRef<str> for Property {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =#========================================================================#=
// RULES
// =#========================================================================#=
/// Rule set named by `RU`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesKind {
    Chinese,
    Japanese,
    Korean,
    Aga,
    NewZealand,
    /// Ing rules, written `GOE`
    Ing,
    Other(String),
}

impl RulesKind {
    /// Interprets a `RU` value; unknown names are kept verbatim.
    pub fn from_sgf(value: &str) -> RulesKind {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "chinese" | "cn" => RulesKind::Chinese,
            "japanese" | "jp" => RulesKind::Japanese,
            "korean" | "ko" => RulesKind::Korean,
            "aga" => RulesKind::Aga,
            "nz" | "new zealand" => RulesKind::NewZealand,
            "goe" | "ing" => RulesKind::Ing,
            _ => RulesKind::Other(value.to_string()),
        }
    }
}

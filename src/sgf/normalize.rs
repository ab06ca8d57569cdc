//! Root normalization passes applied to every decoded game.
//!
//! Legacy SGF writers disagree on a few root conventions. After a game has been
//! decoded, [normalize_root] rewrites its root so the rest of an application only
//! ever sees one convention:
//! 1. [canonicalize_charset] - `CA` is set to [CANONICAL_CHARSET]
//! 2. [fix_komi] - quarter-point komi (area counting stones) is doubled
//! 3. [fix_white_first] - games where white moves first get `PL[W]`

use crate::model::{Color, GameTree, Property};
use crate::sgf::defs::CANONICAL_CHARSET;

/// Applies all normalization passes to the root of `tree`, in order.
pub fn normalize_root(tree: &mut GameTree) {
    canonicalize_charset(tree);
    fix_komi(tree);
    fix_white_first(tree);
}

/// Forces the root's `CA` to [CANONICAL_CHARSET].
///
/// Decoded values are Rust strings, so the charset declared in the file no
/// longer describes them.
pub fn canonicalize_charset(tree: &mut GameTree) {
    tree.root_mut().set(Property::Charset, CANONICAL_CHARSET);
}

/// Doubles a komi with fractional part 0.25 or 0.75 (e.g. `KM[3.75]` -> `KM[7.5]`).
///
/// A missing or non-numeric `KM` is left untouched. The fix is idempotent,
/// since a doubled quarter always ends in .5.
///
/// # Returns
/// `true` if the komi was rewritten
pub fn fix_komi(tree: &mut GameTree) -> bool {
    let root = tree.root_mut();
    let Some(komi) = root.komi() else {
        return false;
    };

    let fraction = komi - komi.floor();
    if fraction == 0.25 || fraction == 0.75 {
        root.set(Property::Komi, (komi * 2.0).to_string());
        return true;
    }

    false
}

/// Sets `PL[W]` on a root without moves or `PL` whose first child is a white move.
///
/// # Returns
/// `true` if `PL` was added
pub fn fix_white_first(tree: &mut GameTree) -> bool {
    let root = tree.root();
    if root.has(Property::PlayerToMove) || root.has(Property::Black) || root.has(Property::White) {
        return false;
    }
    let Some(first) = root.main_child() else {
        return false;
    };

    let child = &tree[first];
    if child.has(Property::White) && !child.has(Property::Black) {
        tree.root_mut().set(Property::PlayerToMove, Color::White.key());
        return true;
    }

    false
}

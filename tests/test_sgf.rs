use sgftree::model::{Color, Move, Point, Property};
use sgftree::parser::{ByteParser, ParsingErrorType};
use sgftree::sgf::{self, SgfParser};
use sgftree::load_sgf;

const MINIMAL_GAME: &[u8] = b"(;GM[1]FF[4]CA[UTF-8]SZ[19];B[pd];W[dd])";

// --- BASIC DECODING ---
#[test]
fn test_minimal_game() {
    let games = load_sgf(MINIMAL_GAME).unwrap();
    assert_eq!(games.len(), 1);
    let tree = &games[0];
    assert!(tree.is_valid());

    let root = tree.root();
    assert_eq!(root.get("GM"), Some("1"));
    assert_eq!(root.get("FF"), Some("4"));
    assert_eq!(root.get(Property::Charset), Some("UTF-8"));
    assert_eq!(root.board_size(), Some((19, 19)));
    // Black moves first, no PL needed
    assert_eq!(root.get(Property::PlayerToMove), None);

    let black = tree.main_child(tree.root_index()).unwrap();
    assert_eq!(tree[black].get("B"), Some("pd"));
    assert_eq!(tree.children(black).len(), 1);
    let white = tree.main_child(black).unwrap();
    assert_eq!(tree[white].get("W"), Some("dd"));
    assert!(tree[white].is_leaf());

    assert_eq!(tree.parent(white), Some(black));
    assert_eq!(tree.parent(black), Some(tree.root_index()));
    assert_eq!(
        tree[white].move_played(tree.board_size()),
        Some((Color::White, Move::Play(Point::new(3, 3))))
    );
}

#[test]
fn test_bom_is_skipped() {
    let mut with_bom = b"\xEF\xBB\xBF".to_vec();
    with_bom.extend_from_slice(MINIMAL_GAME);
    assert_eq!(load_sgf(&with_bom).unwrap(), load_sgf(MINIMAL_GAME).unwrap());
}

#[test]
fn test_whitespace_and_lowercase_ignored_outside_values() {
    let games = load_sgf(b"  \r\n(\n ;\tGM[1] AddBlack[aa][bb]\n ;B[cc] )\n").unwrap();
    let tree = &games[0];
    let root = tree.root();
    assert_eq!(root.get_list("AB").unwrap(), &["aa".to_string(), "bb".to_string()]);
    assert_eq!(tree.num_nodes(), 2);
}

#[test]
fn test_back_to_back_properties() {
    let games = load_sgf(b"(;AB[aa][bb]CR[cc]AW[dd])").unwrap();
    let root = games[0].root();
    assert_eq!(root.get_list(Property::AddBlack).unwrap().len(), 2);
    assert_eq!(root.get("CR"), Some("cc"));
    assert_eq!(root.get(Property::AddWhite), Some("dd"));
    assert_eq!(root.keys().collect::<Vec<_>>(), vec!["AB", "CR", "AW", "CA"]);
}

#[test]
fn test_repeated_values_preserved() {
    let games = load_sgf(b"(;AB[aa][aa]LB[aa:x][aa:x])").unwrap();
    let root = games[0].root();
    assert_eq!(root.get_list("AB").unwrap().len(), 2);
    assert_eq!(root.get_list("LB").unwrap().len(), 2);
}

#[test]
fn test_empty_value_is_a_pass() {
    let games = load_sgf(b"(;SZ[19];B[];W[tt])").unwrap();
    let tree = &games[0];
    let black = tree.main_child(0).unwrap();
    let white = tree.main_child(black).unwrap();
    assert!(tree[black].has("B"));
    assert_eq!(tree[black].get("B"), Some(""));
    assert_eq!(tree[black].move_played((19, 19)), Some((Color::Black, Move::Pass)));
    assert_eq!(tree[white].move_played((19, 19)), Some((Color::White, Move::Pass)));
}

// --- ESCAPING ---
#[test]
fn test_escaped_bytes_taken_literally() {
    let games = load_sgf(br"(;C[a\]b\\c])").unwrap();
    assert_eq!(games[0].root().comment(), Some(r"a]b\c"));
}

#[test]
fn test_value_may_contain_grammar_bytes() {
    let games = load_sgf(b"(;C[(;B[aa\\]\n;)])").unwrap();
    assert_eq!(games[0].root().comment(), Some("(;B[aa]\n;)"));
    assert_eq!(games[0].num_nodes(), 1);
}

#[test]
fn test_escape_at_end_of_input() {
    let err = load_sgf(b"(;C[abc\\").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnterminatedTree);
}

// --- VARIATIONS ---
#[test]
fn test_variation_order() {
    let games = load_sgf(b"(;B[aa](;W[bb])(;W[cc]))").unwrap();
    let tree = &games[0];
    let root = tree.root_index();
    assert_eq!(tree.root().get("B"), Some("aa"));

    let children = tree.children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(tree[children[0]].get("W"), Some("bb"));
    assert_eq!(tree[children[1]].get("W"), Some("cc"));
    assert_eq!(tree.main_child(root), Some(children[0]));
    assert!(tree.is_valid());
}

#[test]
fn test_nested_variations() {
    let sgf = b"(;GM[1];B[aa](;W[bb];B[cc])(;W[dd];B[ee](;W[ff])(;W[gg]))(;W[hh]))";
    let games = load_sgf(sgf).unwrap();
    let tree = &games[0];
    assert!(tree.is_valid());
    assert_eq!(tree.num_nodes(), 9);

    let black = tree.main_child(0).unwrap();
    let replies: Vec<_> = tree
        .children(black)
        .iter()
        .map(|&c| tree[c].get("W").unwrap())
        .collect();
    assert_eq!(replies, vec!["bb", "dd", "hh"]);

    let main: Vec<_> = tree
        .main_line()
        .filter_map(|n| tree[n].move_value().map(|(_, v)| v))
        .collect();
    assert_eq!(main, vec!["aa", "bb", "cc"]);
}

#[test]
fn test_root_without_semicolon_is_tolerated() {
    let games = load_sgf(b"(GM[1]SZ[9];B[ee])").unwrap();
    let tree = &games[0];
    assert_eq!(tree.root().get("GM"), Some("1"));
    assert_eq!(tree.board_size(), (9, 9));
    assert_eq!(tree.num_nodes(), 2);
}

// --- COLLECTIONS ---
#[test]
fn test_collection_of_games() {
    let games = load_sgf(b"(;PB[Honinbo Shusaku];B[qd])\n(;PB[Go Seigen];B[dd])").unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].root().get(Property::PlayerBlack), Some("Honinbo Shusaku"));
    assert_eq!(games[1].root().get(Property::PlayerBlack), Some("Go Seigen"));
}

#[test]
fn test_trailing_corruption_dropped() {
    let games = load_sgf(b"(;B[aa])(;W[bb])(garbage").unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].root().get("B"), Some("aa"));
    assert_eq!(games[1].root().get("W"), Some("bb"));
}

#[test]
fn test_trailing_corruption_fails_strict_collection() {
    let parser = SgfParser::new().with_strict_collection(true);
    let err = parser.load(b"(;B[aa])(;W[bb])(garbage").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnterminatedTree);

    // Trailing whitespace is not garbage
    assert_eq!(parser.load(b"(;B[aa])\r\n\r\n").unwrap().len(), 1);
}

#[test]
fn test_short_tail_ends_collection() {
    let games = load_sgf(b"(;B[aa])x)").unwrap();
    assert_eq!(games.len(), 1);
}

#[test]
fn test_error_in_first_game_propagates() {
    let err = load_sgf(b"(;B[aa]W[bb])(;W[cc])").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateMove);
}

#[test]
fn test_parse_all_from_byte_parser() {
    let mut parser = ByteParser::for_str("(;B[aa]) (;B[bb]) (;B[cc])");
    let games = SgfParser::new().parse_all(&mut parser).unwrap();
    assert_eq!(games.len(), 3);
    assert!(parser.is_eof());
}

// --- ERRORS ---
#[test]
fn test_duplicate_move() {
    let err = load_sgf(b"(;B[aa]W[bb])").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateMove);

    let err = load_sgf(b"(;W[aa]B[bb])").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateMove);

    let err = load_sgf(b"(;B[aa][bb])").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateMove);
}

#[test]
fn test_empty_collection() {
    for input in [&b""[..], b"  \n ", b"\xEF\xBB\xBF", b"\n\n\n\n\n\n"] {
        let err = load_sgf(input).unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::EmptyCollection);
    }
}

#[test]
fn test_unterminated_tree() {
    for input in [&b"(;B[aa]"[..], b"(;B[aa", b"(;B[aa](;W[bb])", b"(;   "] {
        let err = load_sgf(input).unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnterminatedTree, "input {input:?}");
    }
}

#[test]
fn test_dangling_close() {
    let err = load_sgf(b"( )").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DanglingClose);
    assert_eq!(err.position(), 2);
}

#[test]
fn test_empty_key() {
    let err = load_sgf(b"(;[aa])").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::EmptyKey);
}

#[test]
fn test_subtree_before_first_node() {
    let err = load_sgf(b"((;B[aa]))").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedByte(b'('));

    // Structural, so lax reading does not help
    let err = SgfParser::new().with_lax_reading(true).load(b"((;B[aa]))").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedByte(b'('));
}

#[test]
fn test_error_message() {
    let err = load_sgf(b"(;B[aa]W[bb])").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("SGF load error: Multiple moves in node"));
    assert!(msg.contains("at position"));
}

// --- DEPTH ---
#[test]
fn test_max_depth() {
    let sgf = b"(;B[aa](;W[bb](;B[cc](;W[dd]))))";

    let err = SgfParser::new().with_max_depth(2).load(sgf).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DepthExceeded(2));

    let games = SgfParser::new().with_max_depth(3).load(sgf).unwrap();
    assert_eq!(games[0].main_line().count(), 4);
}

#[test]
fn test_pathological_nesting_does_not_overflow_stack() {
    let depth = 50_000;
    let mut sgf = "(;C[x]".repeat(depth);
    sgf.push_str(&")".repeat(depth));

    let err = load_sgf(sgf.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DepthExceeded(sgf::DEFAULT_MAX_DEPTH));
}

fn nested_variations(count: usize) -> String {
    let mut sgf = "(;C[x]".repeat(count + 1);
    sgf.push_str(&")".repeat(count + 1));
    sgf
}

#[test]
fn test_default_max_depth_accepted() {
    let sgf = nested_variations(sgf::DEFAULT_MAX_DEPTH);
    let games = load_sgf(sgf.as_bytes()).unwrap();
    let tree = &games[0];
    assert_eq!(tree.num_nodes(), sgf::DEFAULT_MAX_DEPTH + 1);
    assert_eq!(tree.main_line().count(), sgf::DEFAULT_MAX_DEPTH + 1);
    assert!(tree.is_valid());

    let sgf = nested_variations(sgf::DEFAULT_MAX_DEPTH + 1);
    let err = load_sgf(sgf.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DepthExceeded(sgf::DEFAULT_MAX_DEPTH));
}

#[test]
fn test_deep_nesting_without_limit() {
    let sgf = nested_variations(100_000);
    let games = SgfParser::new()
        .with_max_depth(usize::MAX)
        .load(sgf.as_bytes())
        .unwrap();
    assert_eq!(games[0].num_nodes(), 100_001);
}

// --- LAX READING ---
#[test]
fn test_lax_reading_skips_unexpected_key_byte() {
    let input = b"(;GM[1]@SZ[19];B[pd])";

    let err = SgfParser::new().load(input).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedByte(b'@'));
    assert_eq!(err.position(), 7);

    let games = SgfParser::new().with_lax_reading(true).load(input).unwrap();
    let tree = &games[0];
    assert_eq!(tree.root().get("GM"), Some("1"));
    assert_eq!(tree.root().get("SZ"), Some("19"));
    assert_eq!(tree.num_nodes(), 2);
}

#[test]
fn test_lax_reading_discards_key_in_progress() {
    let games = SgfParser::new()
        .with_lax_reading(true)
        .load(b"(;GM[1]X1Y[7]C[hi])")
        .unwrap();
    let root = games[0].root();
    assert!(!root.has("XY"));
    assert_eq!(root.get("Y"), Some("7"));
    assert_eq!(root.comment(), Some("hi"));
}

#[test]
fn test_lowercase_before_tree_ignored() {
    let games = load_sgf(b"sgf (;B[aa])").unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].root().get("B"), Some("aa"));

    let games = load_sgf(b"game one\n(;B[aa])\ngame two\n(;W[bb])").unwrap();
    assert_eq!(games.len(), 2);
}

#[test]
fn test_lax_reading_skips_bytes_before_tree() {
    let input = b"Game record:\n(;B[aa])";

    let err = load_sgf(input).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedByte(b'G'));

    let games = SgfParser::new().with_lax_reading(true).load(input).unwrap();
    assert_eq!(games.len(), 1);
}

// --- ENCODINGS ---
#[test]
fn test_utf8_values() {
    let games = load_sgf("(;PB[本因坊秀策]C[Élégant])".as_bytes()).unwrap();
    let root = games[0].root();
    assert_eq!(root.get("PB"), Some("本因坊秀策"));
    assert_eq!(root.comment(), Some("Élégant"));
}

#[test]
fn test_invalid_utf8_without_charset() {
    let err = load_sgf(b"(;C[caf\xE9])").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParsingErrorType::Decode {
            encoding: "UTF-8".to_string()
        }
    );
}

#[test]
fn test_charset_restart() {
    let games = load_sgf(b"(;CA[ISO-8859-1]C[caf\xE9];B[aa]C[na\xEFve])").unwrap();
    let tree = &games[0];
    assert_eq!(tree.root().comment(), Some("café"));
    let black = tree.main_child(0).unwrap();
    assert_eq!(tree[black].comment(), Some("naïve"));
    // Declared charset replaced by the canonical one
    assert_eq!(tree.root().charset(), Some("UTF-8"));
    assert_eq!(tree.num_nodes(), 2);
}

#[test]
fn test_charset_restart_for_multibyte_encoding() {
    let games = load_sgf(b"(;CA[Shift_JIS]PB[\x82\xA0])").unwrap();
    assert_eq!(games[0].root().get(Property::PlayerBlack), Some("あ"));
}

#[test]
fn test_charset_in_variation_is_ignored() {
    // Only the outermost tree may switch the charset
    let err = load_sgf(b"(;GM[1](;CA[ISO-8859-1]C[caf\xE9]))").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::Decode { .. }));
}

#[test]
fn test_charset_restart_happens_once() {
    // After switching to latin-1 the nested Shift_JIS declaration is just a value
    let games = load_sgf(b"(;CA[latin1]C[caf\xE9](;CA[Shift_JIS]C[\x82\xA0]))").unwrap();
    let tree = &games[0];
    assert_eq!(tree.root().comment(), Some("café"));

    let variation = tree.main_child(0).unwrap();
    assert_eq!(tree[variation].charset(), Some("Shift_JIS"));
    assert_eq!(tree[variation].comment(), Some("\u{201A}\u{A0}"));
}

#[test]
fn test_charset_synonym_does_not_restart() {
    let games = load_sgf("(;CA[utf8]C[日本])".as_bytes()).unwrap();
    assert_eq!(games[0].root().comment(), Some("日本"));
}

#[test]
fn test_unsupported_charset_keeps_decoding() {
    let games = load_sgf(b"(;CA[klingon]C[qapla'])").unwrap();
    let root = games[0].root();
    assert_eq!(root.comment(), Some("qapla'"));
    assert_eq!(root.charset(), Some("UTF-8"));
}

#[test]
fn test_each_game_restarts_independently() {
    let games = load_sgf(b"(;CA[ISO-8859-1]C[\xE9])(;C[\xC3\xA9])").unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].root().comment(), Some("é"));
    assert_eq!(games[1].root().comment(), Some("é"));
}

#[test]
fn test_default_encoding() {
    let parser = SgfParser::new().with_default_encoding(encoding_rs::WINDOWS_1252);
    let games = parser.load(b"(;C[caf\xE9])").unwrap();
    assert_eq!(games[0].root().comment(), Some("café"));
}

#[test]
fn test_load_with_configured_parser() {
    let input = b"(;GM[1]@SZ[19])";
    assert!(sgf::load(input).is_err());
    let lax = SgfParser::new().with_lax_reading(true);
    assert_eq!(sgf::load_with(input, &lax).unwrap().len(), 1);
}

// --- FILES ---
#[test]
fn test_parse_missing_file() {
    let err = sgf::parse_file("does/not/exist.sgf").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::Io(_)));
}

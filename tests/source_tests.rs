use hexagony::grid::source::SourceCode;
use hexagony::grid::{code_length, count_operators, hexagon_size};

const FIBONACCI: &str = ")=\"/}.!+/M8;";

#[test]
fn size_is_derived_from_significant_codepoints() {
    assert_eq!(SourceCode::from_string("").size(), 1);
    assert_eq!(SourceCode::from_string("@").size(), 1);
    assert_eq!(SourceCode::from_string(FIBONACCI).size(), 3);
    assert_eq!(hexagon_size(count_operators(FIBONACCI)), 3);
}

#[test]
fn layout_round_trips_losslessly() {
    let layout = SourceCode::from_string(FIBONACCI).layout_code();
    let parsed = SourceCode::from_string(&layout);
    assert_eq!(parsed.to_string(), layout);
    assert_eq!(parsed.minify_code(), FIBONACCI);
}

#[test]
fn minify_is_idempotent_on_real_programs() {
    for code in [FIBONACCI, "@", ",;,;,;", "a......"] {
        let once = SourceCode::from_string(code).minify_code();
        let twice = SourceCode::from_string(&once).minify_code();
        assert_eq!(once, twice);
    }
}

#[test]
fn minified_code_never_shrinks_the_hexagon() {
    let minified = SourceCode::from_string("ab.....").minify_code();
    assert_eq!(minified, "ab");
    assert!(minified.chars().count() > code_length(1));
    assert_eq!(SourceCode::from_string(&minified).size(), 2);
}

#[test]
fn resize_round_trip_preserves_minified_code() {
    let grown = SourceCode::from_string(FIBONACCI).resize_code(4);
    assert_eq!(SourceCode::from_string(&grown).size(), 4);
    let restored = SourceCode::from_string(&grown).resize_code(3);
    assert_eq!(restored, FIBONACCI);
}

#[test]
fn resize_shifts_the_lower_half_to_preserve_mirrors() {
    // Growing pads every row on the right and shifts rows below the middle
    // right by one cell.
    let grown = SourceCode::from_string("abcdefg").resize_code(3);
    assert_eq!(grown, "ab.cde..fg");
}

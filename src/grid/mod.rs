//! Hexagonal source-grid model
//!
//! This module provides the grid-side abstractions:
//! - [`direction`]: the six headings and their mirror/branch reflection tables
//! - [`point`]: axial hex coordinates
//! - [`source`]: lossless source text <-> triangular grid conversion
//!
//! # Grid Shape
//!
//! A hexagon of edge length `size` has `2 * size - 1` rows; row `i` holds
//! `row_size(size, i)` cells, growing from `size` cells at the top to
//! `2 * size - 1` in the middle and shrinking back down. Total capacity is
//! `code_length(size) = 1 + 6 * size * (size - 1) / 2` cells.
//!
//! The free functions below implement that sizing math plus the
//! codepoint/whitespace accounting shared by the grid transforms and
//! program statistics.

pub mod direction;
pub mod point;
pub mod source;

use point::PointAxial;

/// Number of cells in a hexagon of the given edge length.
pub fn code_length(size: usize) -> usize {
    if size == 0 {
        0
    } else {
        1 + 3 * size * (size - 1)
    }
}

/// Smallest hexagon edge length whose capacity covers `count` cells.
pub fn hexagon_size(count: usize) -> usize {
    let mut size = 1;
    while code_length(size) < count {
        size += 1;
    }
    size
}

/// Number of rows in a hexagon of the given edge length.
pub fn row_count(size: usize) -> usize {
    2 * size - 1
}

/// Number of cells in row `i` of a hexagon of the given edge length.
pub fn row_size(size: usize, i: usize) -> usize {
    let mut extra = i;
    if extra >= size {
        extra = row_count(size) - 1 - i;
    }
    size + extra
}

/// Axial coordinates of the cell at `(row, column)` in a hexagon of the
/// given edge length.
pub fn index_to_axial(size: usize, row: usize, column: usize) -> PointAxial {
    let size = size as i64;
    let row = row as i64;
    PointAxial::new((1 - size).max(-row) + column as i64, row - size + 1)
}

/// Number of Unicode codepoints in `code`.
pub fn count_codepoints(code: &str) -> usize {
    code.chars().count()
}

/// Number of UTF-8 bytes in `code`.
pub fn count_bytes(code: &str) -> usize {
    code.len()
}

/// Number of debug metacharacters (`` ` ``) in `code`.
pub fn count_debug(code: &str) -> usize {
    code.chars().filter(|&c| c == '`').count()
}

/// Number of cells that are not no-ops.
pub fn count_operators(code: &str) -> usize {
    remove_whitespace_and_debug(code)
        .chars()
        .filter(|&c| c != '.')
        .count()
}

/// Whether `c` is insignificant in source text: whitespace, or the debug
/// marker that may prefix any cell.
pub fn is_whitespace_or_debug(c: char) -> bool {
    matches!(c, '`' | ' ' | '\t' | '\n' | '\u{b}' | '\u{c}' | '\r')
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{b}' | '\u{c}' | '\r')
}

/// Whether `code` contains whitespace (the debug marker does not count).
pub fn contains_whitespace(code: &str) -> bool {
    code.chars().any(is_whitespace)
}

/// Strip whitespace, keeping debug markers.
pub fn remove_whitespace(code: &str) -> String {
    code.chars().filter(|&c| !is_whitespace(c)).collect()
}

/// Strip whitespace and debug markers.
pub fn remove_whitespace_and_debug(code: &str) -> String {
    code.chars().filter(|&c| !is_whitespace_or_debug(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_length_is_the_centered_hexagonal_sequence() {
        assert_eq!(code_length(0), 0);
        assert_eq!(code_length(1), 1);
        assert_eq!(code_length(2), 7);
        assert_eq!(code_length(3), 19);
        assert_eq!(code_length(4), 37);
    }

    #[test]
    fn hexagon_size_is_the_smallest_covering_size() {
        assert_eq!(hexagon_size(0), 1);
        assert_eq!(hexagon_size(1), 1);
        assert_eq!(hexagon_size(2), 2);
        assert_eq!(hexagon_size(7), 2);
        assert_eq!(hexagon_size(8), 3);
        assert_eq!(hexagon_size(19), 3);
        assert_eq!(hexagon_size(20), 4);
    }

    #[test]
    fn row_sizes_grow_then_shrink() {
        assert_eq!(row_count(3), 5);
        let sizes: Vec<usize> = (0..row_count(3)).map(|i| row_size(3, i)).collect();
        assert_eq!(sizes, [3, 4, 5, 4, 3]);
        assert_eq!(sizes.iter().sum::<usize>(), code_length(3));
    }

    #[test]
    fn index_to_axial_covers_the_hexagon() {
        // Top-left, center, and bottom-middle of a size-3 hexagon.
        assert_eq!(index_to_axial(3, 0, 0), PointAxial::new(0, -2));
        assert_eq!(index_to_axial(3, 2, 2), PointAxial::new(0, 0));
        assert_eq!(index_to_axial(3, 4, 2), PointAxial::new(0, 2));
    }

    #[test]
    fn whitespace_helpers_agree() {
        let code = " a\tb`c\nd.";
        assert_eq!(remove_whitespace(code), "ab`cd.");
        assert_eq!(remove_whitespace_and_debug(code), "abcd.");
        assert!(contains_whitespace(code));
        assert!(!contains_whitespace("ab`cd."));
        assert_eq!(count_debug(code), 1);
        assert_eq!(count_operators(code), 4);
        assert_eq!(count_codepoints("héx"), 3);
        assert!(count_bytes("héx") > 3);
    }
}

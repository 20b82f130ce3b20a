//! Source code grid
//!
//! Converts linear source text into a triangular grid of single-character
//! cells and back. Whitespace and debug markers preceding a cell are kept
//! in a parallel prefix grid so that the original text can be reproduced
//! losslessly; code that never contained whitespace round-trips through the
//! minified form instead.
//!
//! Resizing only supports changing the edge length by one. Growing appends
//! filler cells to the right of every row and shifts the lower half right
//! by one cell to keep mirrors aligned about the horizontal middle;
//! shrinking is the exact inverse. Both transforms rebuild fresh row
//! buffers rather than splicing in place.

use std::fmt;

use super::point::PointAxial;
use super::{
    code_length, contains_whitespace, count_codepoints, count_debug, hexagon_size,
    is_whitespace_or_debug, remove_whitespace, remove_whitespace_and_debug, row_count, row_size,
};

/// A program laid out on a hexagonal grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCode {
    size: usize,
    grid: Vec<Vec<char>>,
    prefix_grid: Vec<Vec<String>>,
}

impl SourceCode {
    /// Build from structural parts. Every row of `grid` and `prefix_grid`
    /// must already have `row_size(size, i)` entries.
    pub fn from_parts(size: usize, grid: Vec<Vec<char>>, prefix_grid: Vec<Vec<String>>) -> Self {
        debug_assert_eq!(grid.len(), row_count(size));
        debug_assert_eq!(prefix_grid.len(), row_count(size));
        debug_assert!((0..row_count(size)).all(|i| {
            grid[i].len() == row_size(size, i) && prefix_grid[i].len() == row_size(size, i)
        }));
        SourceCode {
            size,
            grid,
            prefix_grid,
        }
    }

    /// Parse source text. The hexagon size is derived from the number of
    /// significant codepoints; cells beyond the end of the text are filled
    /// with the no-op `.`.
    pub fn from_string(code: &str) -> Self {
        let size = hexagon_size(count_codepoints(&remove_whitespace_and_debug(code)));
        let mut grid = Vec::with_capacity(row_count(size));
        let mut prefix_grid = Vec::with_capacity(row_count(size));
        let mut chars = code.chars();

        for i in 0..row_count(size) {
            let cells = row_size(size, i);
            let mut row = Vec::with_capacity(cells);
            let mut prefix_row = Vec::with_capacity(cells);
            for _ in 0..cells {
                let mut prefix = String::new();
                let mut next = chars.next();
                while let Some(c) = next {
                    if !is_whitespace_or_debug(c) {
                        break;
                    }
                    prefix.push(c);
                    next = chars.next();
                }
                prefix_row.push(prefix);
                row.push(next.unwrap_or('.'));
            }
            grid.push(row);
            prefix_grid.push(prefix_row);
        }

        SourceCode {
            size,
            grid,
            prefix_grid,
        }
    }

    /// Edge length of the hexagon.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grid position of an axial coordinate, or `None` when it lies outside
    /// the hexagon.
    pub fn axial_to_index(&self, coords: PointAxial) -> Option<(usize, usize)> {
        let size = self.size as i64;
        let x = coords.q;
        let z = coords.r;
        let y = -x - z;
        if x.abs().max(y.abs()).max(z.abs()) >= size {
            return None;
        }

        let i = z + size - 1;
        let j = x + i.min(size - 1);
        Some((i as usize, j as usize))
    }

    /// Instruction at an axial coordinate. Off-grid coordinates read as the
    /// no-op `.`.
    pub fn instruction_at(&self, coords: PointAxial) -> char {
        match self.axial_to_index(coords) {
            Some((i, j)) => self.grid[i][j],
            None => '.',
        }
    }

    /// Whether any cell prefix carries whitespace. Decides which
    /// serialization (`layout_code` or `minify_code`) preserves the
    /// author's formatting style.
    pub fn contains_whitespace(&self) -> bool {
        self.prefix_grid
            .iter()
            .flatten()
            .any(|prefix| contains_whitespace(prefix))
    }

    /// Re-serialize for a hexagon one size larger or smaller. Only a change
    /// of one is supported; the lower-half shift that keeps mirrors aligned
    /// is not defined for larger jumps.
    pub fn resize_code(&self, new_size: usize) -> String {
        let new_row_count = row_count(new_size);
        let mut grid = Vec::with_capacity(new_row_count);
        let mut prefix_grid = Vec::with_capacity(new_row_count);

        if new_size > self.size {
            for i in 0..self.grid.len() {
                let cells = row_size(new_size, i);
                let mut row = Vec::with_capacity(cells);
                let mut prefix_row = Vec::with_capacity(cells);
                if i >= self.size {
                    // Shift the bottom half right to preserve mirrors.
                    row.push('.');
                    prefix_row.push(String::new());
                }
                row.extend(self.grid[i].iter().copied());
                prefix_row.extend(self.prefix_grid[i].iter().cloned());
                while row.len() < cells {
                    row.push('.');
                    prefix_row.push(String::new());
                }
                grid.push(row);
                prefix_grid.push(prefix_row);
            }
            for i in self.grid.len()..new_row_count {
                let cells = row_size(new_size, i);
                grid.push(vec!['.'; cells]);
                prefix_grid.push(vec![String::new(); cells]);
            }
        } else {
            for i in 0..new_row_count {
                let cells = row_size(new_size, i);
                // Shift the bottom half back left to preserve mirrors.
                let offset = if i >= new_size { 1 } else { 0 };
                grid.push(self.grid[i][offset..offset + cells].to_vec());
                prefix_grid.push(self.prefix_grid[i][offset..offset + cells].to_vec());
            }
        }

        let resized = SourceCode::from_parts(new_size, grid, prefix_grid);
        if self.contains_whitespace() {
            resized.layout_code()
        } else {
            resized.minify_code()
        }
    }

    /// Replace all content with no-ops, keeping the formatting style.
    pub fn reset_code(&self) -> String {
        let blank = SourceCode::from_string(&".".repeat(code_length(self.size)));
        if self.contains_whitespace() {
            blank.layout_code()
        } else {
            blank.minify_code()
        }
    }

    /// Compact serialization: whitespace stripped and trailing no-ops
    /// trimmed, but never below the length that keeps the hexagon from
    /// being read back one size smaller.
    pub fn minify_code(&self) -> String {
        let minimum_length = code_length(self.size.saturating_sub(1)) + 1;
        let mut result = remove_whitespace(&self.to_string_internal());
        let trimmed = result.trim_end_matches('.').len();
        result.truncate(trimmed);
        let length = count_codepoints(&result) - count_debug(&result);
        if length < minimum_length {
            result.push_str(&".".repeat(minimum_length - length));
        }
        result
    }

    /// Human-readable serialization: one row per line, indented into a
    /// visual hexagon, debug prefixes kept in front of their cells.
    pub fn layout_code(&self) -> String {
        let rows = row_count(self.size);
        let mut result = String::new();
        for i in 0..rows {
            for _ in 0..rows - row_size(self.size, i) {
                result.push(' ');
            }
            for (j, &cell) in self.grid[i].iter().enumerate() {
                let prefix = remove_whitespace(&self.prefix_grid[i][j]);
                if prefix.is_empty() {
                    result.push(' ');
                } else {
                    result.push_str(&prefix);
                }
                result.push(cell);
            }
            if i != rows - 1 {
                result.push('\n');
            }
        }
        result
    }

    fn to_string_internal(&self) -> String {
        let mut result = String::new();
        for (row, prefix_row) in self.grid.iter().zip(&self.prefix_grid) {
            for (&cell, prefix) in row.iter().zip(prefix_row) {
                result.push_str(prefix);
                result.push(cell);
            }
        }
        result
    }
}

impl fmt::Display for SourceCode {
    /// The exact original text when whitespace is present, otherwise the
    /// minified form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.to_string_internal();
        if contains_whitespace(&result) {
            write!(f, "{}", result)
        } else {
            write!(f, "{}", self.minify_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::index_to_axial;

    #[test]
    fn from_string_derives_size_and_pads_with_noops() {
        let source = SourceCode::from_string("abc");
        assert_eq!(source.size(), 2);
        assert_eq!(source.instruction_at(PointAxial::new(0, -1)), 'a');
        assert_eq!(source.instruction_at(PointAxial::new(1, -1)), 'b');
        assert_eq!(source.instruction_at(PointAxial::new(-1, 0)), 'c');
        assert_eq!(source.instruction_at(PointAxial::new(0, 1)), '.');
    }

    #[test]
    fn off_grid_reads_as_noop() {
        let source = SourceCode::from_string("abc");
        assert_eq!(source.instruction_at(PointAxial::new(5, 5)), '.');
        assert_eq!(source.axial_to_index(PointAxial::new(2, 0)), None);
    }

    #[test]
    fn axial_to_index_inverts_index_to_axial() {
        let source = SourceCode::from_string(&"x".repeat(19));
        for i in 0..row_count(3) {
            for j in 0..row_size(3, i) {
                let coords = index_to_axial(3, i, j);
                assert_eq!(source.axial_to_index(coords), Some((i, j)));
            }
        }
    }

    #[test]
    fn minify_trims_trailing_noops_but_keeps_the_size() {
        assert_eq!(SourceCode::from_string("a......").minify_code(), "a.");
        assert_eq!(SourceCode::from_string("abcdefg").minify_code(), "abcdefg");
        assert_eq!(SourceCode::from_string("@").minify_code(), "@");
    }

    #[test]
    fn minify_is_idempotent() {
        for code in ["a......", "ab.cde..fg", ")=\"/}.!+/M8;"] {
            let once = SourceCode::from_string(code).minify_code();
            let twice = SourceCode::from_string(&once).minify_code();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn layout_forms_a_hexagon() {
        let source = SourceCode::from_string("abcdefg");
        assert_eq!(source.layout_code(), "  a b\n c d e\n  f g");
    }

    #[test]
    fn display_reproduces_whitespace_exactly() {
        let layout = SourceCode::from_string("abcdefg").layout_code();
        assert_eq!(SourceCode::from_string(&layout).to_string(), layout);
    }

    #[test]
    fn display_minifies_whitespace_free_code() {
        assert_eq!(SourceCode::from_string("abc....").to_string(), "abc");
    }

    #[test]
    fn debug_markers_survive_round_trips() {
        let source = SourceCode::from_string("`abc");
        assert_eq!(source.minify_code(), "`abc");
        assert!(!source.contains_whitespace());
    }

    #[test]
    fn resize_up_then_down_restores_the_code() {
        let original = SourceCode::from_string("abcdefg");
        let grown = original.resize_code(3);
        assert_eq!(grown, "ab.cde..fg");
        let shrunk = SourceCode::from_string(&grown).resize_code(2);
        assert_eq!(shrunk, "abcdefg");
    }

    #[test]
    fn resize_preserves_layout_style() {
        let layout = SourceCode::from_string("abcdefg").layout_code();
        let grown = SourceCode::from_string(&layout).resize_code(3);
        assert!(grown.contains('\n'));
        let shrunk = SourceCode::from_string(&grown).resize_code(2);
        assert_eq!(shrunk, layout);
    }

    #[test]
    fn reset_replaces_content_with_noops() {
        assert_eq!(SourceCode::from_string("abcdefg").reset_code(), "..");
        assert_eq!(
            SourceCode::from_string("  a b\n c d e\n  f g").reset_code(),
            "  . .\n . . .\n  . ."
        );
    }
}

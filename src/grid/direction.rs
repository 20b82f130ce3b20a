//! The six hexagonal headings and their reflection rules
//!
//! Every mirror (`/`, `\`, `_`, `|`) and branch (`<`, `>`) instruction maps
//! each direction to a new one. The tables below are total: every
//! direction/instruction/polarity combination has an explicit entry, so a
//! gap is a compile error rather than a silent fallthrough.
//!
//! Branches are the only polarity-dependent cases: `<` splits an eastward
//! pointer and `>` splits a westward one based on whether the current
//! memory value is positive; every other combination is a fixed mirror.

use std::fmt;

use Direction::{East, NorthEast, NorthWest, SouthEast, SouthWest, West};

/// One of the six hexagonal headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl Direction {
    /// Heading after hitting a `/` mirror.
    pub fn reflect_at_slash(self) -> Self {
        match self {
            East => NorthWest,
            SouthEast => West,
            SouthWest => SouthWest,
            West => SouthEast,
            NorthWest => East,
            NorthEast => NorthEast,
        }
    }

    /// Heading after hitting a `\` mirror.
    pub fn reflect_at_backslash(self) -> Self {
        match self {
            East => SouthWest,
            SouthEast => SouthEast,
            SouthWest => East,
            West => NorthEast,
            NorthWest => NorthWest,
            NorthEast => West,
        }
    }

    /// Heading after hitting a `_` mirror.
    pub fn reflect_at_underscore(self) -> Self {
        match self {
            East => East,
            SouthEast => NorthEast,
            SouthWest => NorthWest,
            West => West,
            NorthWest => SouthWest,
            NorthEast => SouthEast,
        }
    }

    /// Heading after hitting a `|` mirror.
    pub fn reflect_at_pipe(self) -> Self {
        match self {
            East => West,
            SouthEast => SouthWest,
            SouthWest => SouthEast,
            West => East,
            NorthWest => NorthEast,
            NorthEast => NorthWest,
        }
    }

    /// Heading after hitting a `<` branch. `positive` is whether the current
    /// memory value is greater than zero; it only matters when moving east.
    pub fn reflect_at_less_than(self, positive: bool) -> Self {
        match self {
            East => {
                if positive {
                    SouthEast
                } else {
                    NorthEast
                }
            }
            SouthEast => NorthWest,
            SouthWest => West,
            West => East,
            NorthWest => West,
            NorthEast => SouthWest,
        }
    }

    /// Heading after hitting a `>` branch. `positive` only matters when
    /// moving west.
    pub fn reflect_at_greater_than(self, positive: bool) -> Self {
        match self {
            East => West,
            SouthEast => East,
            SouthWest => NorthEast,
            West => {
                if positive {
                    NorthWest
                } else {
                    SouthWest
                }
            }
            NorthWest => SouthEast,
            NorthEast => East,
        }
    }

    /// The opposite heading.
    pub fn reverse(self) -> Self {
        match self {
            East => West,
            SouthEast => NorthWest,
            SouthWest => NorthEast,
            West => East,
            NorthWest => SouthEast,
            NorthEast => SouthWest,
        }
    }

    /// Rendering angle in degrees, measured clockwise from east.
    pub fn angle(self) -> u32 {
        match self {
            East => 0,
            SouthEast => 60,
            SouthWest => 120,
            West => 180,
            NorthWest => 240,
            NorthEast => 300,
        }
    }

    /// Unit movement vector in axial coordinates.
    pub fn vector(self) -> (i64, i64) {
        match self {
            East => (1, 0),
            SouthEast => (0, 1),
            SouthWest => (-1, 1),
            West => (-1, 0),
            NorthWest => (0, -1),
            NorthEast => (1, -1),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        East
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            East => "E",
            SouthEast => "SE",
            SouthWest => "SW",
            West => "W",
            NorthWest => "NW",
            NorthEast => "NE",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 6] = [East, SouthEast, SouthWest, West, NorthWest, NorthEast];

    #[test]
    fn slash_table_matches_reference() {
        let expected = [NorthWest, West, SouthWest, SouthEast, East, NorthEast];
        for (dir, want) in ALL.iter().zip(expected) {
            assert_eq!(dir.reflect_at_slash(), want, "slash from {}", dir);
        }
    }

    #[test]
    fn backslash_table_matches_reference() {
        let expected = [SouthWest, SouthEast, East, NorthEast, NorthWest, West];
        for (dir, want) in ALL.iter().zip(expected) {
            assert_eq!(dir.reflect_at_backslash(), want, "backslash from {}", dir);
        }
    }

    #[test]
    fn underscore_table_matches_reference() {
        let expected = [East, NorthEast, NorthWest, West, SouthWest, SouthEast];
        for (dir, want) in ALL.iter().zip(expected) {
            assert_eq!(dir.reflect_at_underscore(), want, "underscore from {}", dir);
        }
    }

    #[test]
    fn pipe_table_matches_reference() {
        let expected = [West, SouthWest, SouthEast, East, NorthEast, NorthWest];
        for (dir, want) in ALL.iter().zip(expected) {
            assert_eq!(dir.reflect_at_pipe(), want, "pipe from {}", dir);
        }
    }

    #[test]
    fn mirrors_are_permutations() {
        for table in [
            Direction::reflect_at_slash as fn(Direction) -> Direction,
            Direction::reflect_at_backslash,
            Direction::reflect_at_underscore,
            Direction::reflect_at_pipe,
        ] {
            let mut seen = Vec::new();
            for dir in ALL {
                let out = table(dir);
                assert!(!seen.contains(&out));
                seen.push(out);
            }
        }
    }

    #[test]
    fn branches_only_split_along_their_axis() {
        for dir in ALL {
            if dir == East {
                assert_eq!(dir.reflect_at_less_than(true), SouthEast);
                assert_eq!(dir.reflect_at_less_than(false), NorthEast);
            } else {
                assert_eq!(dir.reflect_at_less_than(true), dir.reflect_at_less_than(false));
            }
            if dir == West {
                assert_eq!(dir.reflect_at_greater_than(true), NorthWest);
                assert_eq!(dir.reflect_at_greater_than(false), SouthWest);
            } else {
                assert_eq!(
                    dir.reflect_at_greater_than(true),
                    dir.reflect_at_greater_than(false)
                );
            }
        }
    }

    #[test]
    fn reverse_is_an_involution_and_negates_the_vector() {
        for dir in ALL {
            assert_eq!(dir.reverse().reverse(), dir);
            let (q, r) = dir.vector();
            assert_eq!(dir.reverse().vector(), (-q, -r));
            assert_eq!((dir.angle() + 180) % 360, dir.reverse().angle());
        }
    }
}

//! Axial hex-grid coordinates
//!
//! Both the source grid and the memory grid address cells with axial
//! coordinates `(q, r)`. The third cube coordinate `y = -q - r` is derived
//! on demand for bounds checks and never stored.

use std::fmt;

/// A point in axial hex coordinates.
///
/// Immutable value type: `add`/`subtract` return a new point. The `Display`
/// form `"q,r"` is the canonical key/event format shared with the memory
/// debug dump and edge-event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointAxial {
    pub q: i64,
    pub r: i64,
}

impl PointAxial {
    pub fn new(q: i64, r: i64) -> Self {
        PointAxial { q, r }
    }

    /// Translate by an axial vector.
    pub fn add(self, (q, r): (i64, i64)) -> Self {
        PointAxial::new(self.q + q, self.r + r)
    }

    /// Translate by the negation of an axial vector.
    pub fn subtract(self, (q, r): (i64, i64)) -> Self {
        PointAxial::new(self.q - q, self.r - r)
    }
}

impl fmt::Display for PointAxial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_subtract_are_inverses() {
        let p = PointAxial::new(3, -2);
        assert_eq!(p.add((1, -1)).subtract((1, -1)), p);
        assert_eq!(p.subtract((-4, 7)).add((-4, 7)), p);
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(PointAxial::new(-1, 2).to_string(), "-1,2");
        assert_eq!(PointAxial::default().to_string(), "0,0");
    }
}

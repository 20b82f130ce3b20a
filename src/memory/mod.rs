//! Hexagonal memory model
//!
//! Memory is an unbounded hexagonal grid whose *edges* hold values: each
//! addressable cell is identified by an axial position plus one of the
//! three canonical directions {E, NE, SE}. The opposite three directions
//! never appear as keys; traversal against the grain is expressed by the
//! pointer's chirality flag instead, which keeps the adjacency table at
//! three directions times two chiralities.
//!
//! The memory pointer is `(position, direction, clockwise)`. `move_left`
//! and `move_right` follow the fixed adjacency table; `reverse` only flips
//! the chirality. A move is undone by the chirality-conjugated opposite
//! move (`reverse`, opposite move, `reverse`), which is exactly what the
//! `'` and `"` instructions do.
//!
//! # Change Tracking
//!
//! Writes bump `data_version` and maintain a bounding box in a flat 2D
//! projection (`4q + 2r` horizontally, `2r` vertically); pointer motion
//! bumps `pointer_version`. External observers use the counters to detect
//! change without deep comparison.

use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::grid::direction::Direction;
use crate::grid::point::PointAxial;

/// The memory grid plus its single pointer.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    data: FxHashMap<(PointAxial, Direction), BigInt>,
    mp: PointAxial,
    dir: Direction,
    cw: bool,
    min_x: Option<i64>,
    max_x: Option<i64>,
    min_y: Option<i64>,
    max_y: Option<i64>,
    data_version: u64,
    pointer_version: u64,
}

impl Memory {
    pub fn new() -> Self {
        Memory::default()
    }

    /// Flip the pointer's chirality without moving it.
    pub fn reverse(&mut self) {
        self.cw = !self.cw;
        self.pointer_version += 1;
    }

    /// Move the pointer to the edge on its left.
    pub fn move_left(&mut self) {
        let (mp, dir, cw) = self.left_index();
        self.mp = mp;
        self.dir = dir;
        self.cw = cw;
        self.pointer_version += 1;
    }

    /// Move the pointer to the edge on its right.
    pub fn move_right(&mut self) {
        let (mp, dir, cw) = self.right_index();
        self.mp = mp;
        self.dir = dir;
        self.cw = cw;
        self.pointer_version += 1;
    }

    /// Pointer state after a left move, without moving.
    pub fn left_index(&self) -> (PointAxial, Direction, bool) {
        let (mp, cw) = (self.mp, self.cw);
        match self.dir {
            Direction::NorthEast => {
                let mp = if cw {
                    PointAxial::new(mp.q + 1, mp.r - 1)
                } else {
                    PointAxial::new(mp.q, mp.r - 1)
                };
                (mp, Direction::SouthEast, !cw)
            }
            Direction::East => {
                let mp = if cw { PointAxial::new(mp.q, mp.r + 1) } else { mp };
                (mp, Direction::NorthEast, cw)
            }
            Direction::SouthEast => {
                let mp = if cw { PointAxial::new(mp.q - 1, mp.r + 1) } else { mp };
                (mp, Direction::East, cw)
            }
            _ => unreachable!("memory pointer direction is always E, NE, or SE"),
        }
    }

    /// Pointer state after a right move, without moving.
    pub fn right_index(&self) -> (PointAxial, Direction, bool) {
        let (mp, cw) = (self.mp, self.cw);
        match self.dir {
            Direction::NorthEast => {
                let mp = if cw { mp } else { PointAxial::new(mp.q, mp.r - 1) };
                (mp, Direction::East, cw)
            }
            Direction::East => {
                let mp = if cw { mp } else { PointAxial::new(mp.q + 1, mp.r - 1) };
                (mp, Direction::SouthEast, cw)
            }
            Direction::SouthEast => {
                let mp = if cw {
                    PointAxial::new(mp.q - 1, mp.r + 1)
                } else {
                    PointAxial::new(mp.q, mp.r + 1)
                };
                (mp, Direction::NorthEast, !cw)
            }
            _ => unreachable!("memory pointer direction is always E, NE, or SE"),
        }
    }

    /// Value of an arbitrary edge. Unset edges read as zero.
    pub fn get_value_at(&self, mp: PointAxial, dir: Direction) -> BigInt {
        self.data
            .get(&(mp, dir))
            .cloned()
            .unwrap_or_else(BigInt::zero)
    }

    /// Value of the edge under the pointer.
    pub fn get_value(&self) -> BigInt {
        self.get_value_at(self.mp, self.dir)
    }

    /// Value of the edge to the pointer's left, without moving.
    pub fn get_left(&self) -> BigInt {
        let (mp, dir, _) = self.left_index();
        self.get_value_at(mp, dir)
    }

    /// Value of the edge to the pointer's right, without moving.
    pub fn get_right(&self) -> BigInt {
        let (mp, dir, _) = self.right_index();
        self.get_value_at(mp, dir)
    }

    /// Write the edge under the pointer.
    pub fn set_value<T: Into<BigInt>>(&mut self, value: T) {
        let x = self.get_x();
        let y = self.get_y();
        self.data.insert((self.mp, self.dir), value.into());
        if self.max_x.map_or(true, |max| x > max) {
            self.max_x = Some(x);
        }
        if self.min_x.map_or(true, |min| x < min) {
            self.min_x = Some(x);
        }
        if self.max_y.map_or(true, |max| y > max) {
            self.max_y = Some(y);
        }
        if self.min_y.map_or(true, |min| y < min) {
            self.min_y = Some(y);
        }
        self.data_version += 1;
    }

    /// Horizontal coordinate of the current edge in the flat projection.
    pub fn get_x(&self) -> i64 {
        4 * self.mp.q + 2 * self.mp.r + i64::from(self.dir == Direction::East)
    }

    /// Vertical coordinate of the current edge in the flat projection.
    pub fn get_y(&self) -> i64 {
        2 * self.mp.r
            + match self.dir {
                Direction::NorthEast => 0,
                Direction::East => 1,
                _ => 2,
            }
    }

    pub fn mp(&self) -> PointAxial {
        self.mp
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn cw(&self) -> bool {
        self.cw
    }

    /// Number of edges that have been written.
    pub fn edge_count(&self) -> usize {
        self.data.len()
    }

    /// All written edges, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (PointAxial, Direction, &BigInt)> {
        self.data.iter().map(|(&(mp, dir), value)| (mp, dir, value))
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of all written edges in
    /// the flat projection; `None` until the first write.
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        Some((self.min_x?, self.min_y?, self.max_x?, self.max_y?))
    }

    /// Incremented on every write.
    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    /// Incremented on every pointer move or reversal.
    pub fn pointer_version(&self) -> u64 {
        self.pointer_version
    }
}

impl fmt::Display for Memory {
    /// Debug dump: the pointer state, then one `q,r,dir,value` line per
    /// written edge, sorted so the output is stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.mp, self.dir, self.cw)?;
        let mut edges: Vec<_> = self.data.iter().collect();
        edges.sort_by_key(|((mp, dir), _)| (mp.q, mp.r, dir.angle()));
        for ((mp, dir), value) in edges {
            write!(f, "\n{},{},{}", mp, dir, value)?;
        }
        Ok(())
    }
}

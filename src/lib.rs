//! # Introduction
//!
//! Hexagony is an esoteric programming language whose source code is laid
//! out on a hexagonal grid and executed by six instruction pointers, one
//! active at a time, over an unbounded hexagonal memory of
//! arbitrary-precision integers. This crate is the execution engine: it
//! parses a program into a grid, steps it one instruction at a time, and
//! exposes the full machine state between steps.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source text → SourceCode grid → Interpreter steps → output bytes
//! ```
//!
//! 1. [`grid`] — hexagon sizing math, the [`grid::direction::Direction`]
//!    algebra, axial coordinates, and the lossless
//!    [`grid::source::SourceCode`] text/grid conversion with its
//!    resize/minify/layout transforms.
//! 2. [`memory`] — the sparse hexagonal memory grid and its pointer.
//! 3. [`interpreter`] — the stepping VM: opcode dispatch, edge wraparound
//!    and corner teleportation, byte and integer I/O, termination.
//! 4. [`snapshot`] — deep state snapshots so callers can layer reverse
//!    execution on top of the forward-only engine.
//!
//! ## Stepping contract
//!
//! [`interpreter::engine::Interpreter::step`] executes exactly one
//! instruction and returns; batched execution is a caller loop. The engine
//! never returns errors from stepping: a finished or crashed program
//! freezes the machine and reports an
//! [`interpreter::errors::Termination`] instead.

pub mod grid;
pub mod interpreter;
pub mod memory;
pub mod snapshot;

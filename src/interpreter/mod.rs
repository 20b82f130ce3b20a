//! Hexagony execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the stepping virtual machine
//! - [`errors`]: termination conditions and engine errors
//!
//! # Execution Model
//!
//! Six instruction pointers start at the corners of the hexagon, one
//! active at a time. Each [`engine::Interpreter::step`] call dispatches the
//! instruction under the active pointer, moves it, resolves edge
//! wraparound or corner teleportation, and hands control back to the
//! caller. Batched execution is a caller loop; there is no concurrency or
//! suspension inside the engine.
//!
//! # Termination
//!
//! Fatal conditions are not surfaced as `Result`s: `step` is total, and a
//! program that terminates (via `@` or division by zero) freezes the
//! engine with a [`errors::Termination`] that callers query between steps.

pub mod engine;
pub mod errors;

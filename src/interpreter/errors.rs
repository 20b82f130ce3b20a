//! Termination conditions and engine errors
//!
//! A running program can only stop in two ways, and neither is an error in
//! the `Result` sense: `step` stays total and the engine records a
//! [`Termination`] instead. [`EngineError`] covers the one fallible seam,
//! swapping in source code of a different size.

use std::fmt;

/// Why execution stopped. Set exactly once; the engine is frozen afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The program executed `@`.
    ProgramEnd,

    /// `:` or `%` encountered a zero right operand.
    DivisionByZero,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::ProgramEnd => write!(f, "Program terminated at @."),
            Termination::DivisionByZero => {
                write!(f, "Error: Program terminated due to division by zero.")
            }
        }
    }
}

/// Errors from engine construction and mutation seams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `set_source_code` was given a hexagon of a different size. The
    /// instruction pointers' corner placement depends on the size, so a
    /// swap must not change it.
    SizeMismatch { expected: usize, got: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SizeMismatch { expected, got } => {
                write!(
                    f,
                    "Source code swap requires a size-{} hexagon, got size {}",
                    expected, got
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}

// Execution engine for the Hexagony virtual machine

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::grid::direction::Direction;
use crate::grid::point::PointAxial;
use crate::grid::source::SourceCode;
use crate::interpreter::errors::{EngineError, Termination};
use crate::memory::Memory;
use crate::snapshot::Snapshot;

/// Callback fired when an instruction pointer wraps around an edge or
/// teleports through a corner. Receives the edge name
/// (`"q,r,direction,type"` with type `0`, `+`, or `-`) and whether the
/// transition was a corner branch. Purely observational; it must not feed
/// back into execution.
pub type EdgeEventHandler = Box<dyn FnMut(&str, bool)>;

/// The Hexagony virtual machine.
///
/// Owns the source grid, the memory grid, and six instruction pointers,
/// and executes exactly one instruction per [`step`](Interpreter::step)
/// call. All six pointers advance cooperatively: only the active one moves
/// on a given step, and the executed instruction chooses which pointer is
/// active next.
pub struct Interpreter {
    /// The program. Swappable mid-run for a same-size hexagon.
    source: SourceCode,

    /// Hexagon edge length, fixed for the lifetime of the engine.
    size: usize,

    /// The hexagonal memory grid and its pointer.
    memory: Memory,

    /// Position of each instruction pointer.
    ips: [PointAxial; 6],

    /// Heading of each instruction pointer.
    ip_dirs: [Direction; 6],

    /// Index of the pointer that executes on the next step.
    active_ip: usize,

    /// Executed instruction count.
    ticks: u64,

    /// Program output, append-only.
    output: Vec<u8>,

    /// Program input and the read cursor into it.
    input: Vec<char>,
    input_position: usize,

    /// Set exactly once; execution is frozen afterward.
    termination: Option<Termination>,

    /// Simulation mode: division by zero is skipped and the active pointer
    /// never switches, so the engine can be reused as a pure
    /// cursor-advance simulator.
    simulation: bool,

    /// Set while stepping in reverse: movement happens before dispatch and
    /// `$` is ignored.
    reverse: bool,

    edge_handler: Option<EdgeEventHandler>,
}

impl Interpreter {
    /// Build an engine for `source`, with the six instruction pointers at
    /// the hexagon's corners sweeping inward symmetrically.
    pub fn new(source: SourceCode, input: &str) -> Self {
        let size = source.size();
        let edge = size as i64 - 1;
        Interpreter {
            source,
            size,
            memory: Memory::new(),
            ips: [
                PointAxial::new(0, -edge),
                PointAxial::new(edge, -edge),
                PointAxial::new(edge, 0),
                PointAxial::new(0, edge),
                PointAxial::new(-edge, edge),
                PointAxial::new(-edge, 0),
            ],
            ip_dirs: [
                Direction::East,
                Direction::SouthEast,
                Direction::SouthWest,
                Direction::West,
                Direction::NorthWest,
                Direction::NorthEast,
            ],
            active_ip: 0,
            ticks: 0,
            output: Vec::new(),
            input: input.chars().collect(),
            input_position: 0,
            termination: None,
            simulation: false,
            reverse: false,
            edge_handler: None,
        }
    }

    /// Register the edge-transition callback.
    pub fn set_edge_handler(&mut self, handler: EdgeEventHandler) {
        self.edge_handler = Some(handler);
    }

    /// Put the engine into simulation mode. Division by zero becomes a
    /// no-op instead of terminating, and `[`, `]`, `#` no longer switch
    /// the active pointer.
    pub fn set_simulation_mode(&mut self) {
        self.simulation = true;
    }

    /// Swap in new source code mid-run without touching memory, pointer
    /// positions, or output. The hexagon size must match.
    pub fn set_source_code(&mut self, source: SourceCode) -> Result<(), EngineError> {
        if source.size() != self.size {
            return Err(EngineError::SizeMismatch {
                expected: self.size,
                got: source.size(),
            });
        }
        self.source = source;
        Ok(())
    }

    /// Replace the remaining input and reset the read cursor.
    pub fn set_input(&mut self, input: &str) {
        self.input = input.chars().collect();
        self.input_position = 0;
    }

    /// Seed the current memory edge. Used by simulation callers to steer
    /// `<`/`>` branches.
    pub fn set_memory_value<T: Into<BigInt>>(&mut self, value: T) {
        self.memory.set_value(value);
    }

    /// Execute one instruction for the active pointer. A no-op once the
    /// program has terminated.
    pub fn step(&mut self) {
        if self.termination.is_some() {
            return;
        }
        let opcode = self.source.instruction_at(self.coords());
        self.execute_opcode(opcode);
    }

    /// Step with the active pointer's direction reversed, moving before
    /// dispatch instead of after. `$` is ignored while reversing, because
    /// honoring it backwards would skip the wrong cell.
    pub fn step_reverse(&mut self) {
        if self.termination.is_some() {
            return;
        }
        self.set_dir(self.dir().reverse());
        self.reverse = true;
        self.handle_movement();
        let opcode = self.source.instruction_at(self.coords());
        self.execute_opcode(opcode);
        self.reverse = false;
        self.set_dir(self.dir().reverse());
    }

    fn coords(&self) -> PointAxial {
        self.ips[self.active_ip]
    }

    fn set_coords(&mut self, coords: PointAxial) {
        self.ips[self.active_ip] = coords;
    }

    fn dir(&self) -> Direction {
        self.ip_dirs[self.active_ip]
    }

    fn set_dir(&mut self, dir: Direction) {
        self.ip_dirs[self.active_ip] = dir;
    }

    fn execute_opcode(&mut self, opcode: char) {
        let mut new_ip = self.active_ip;

        match opcode {
            // No-op
            '.' => {}

            // Terminate
            '@' => {
                self.termination = Some(Termination::ProgramEnd);
                self.ticks += 1;
                return;
            }

            // Arithmetic on the current edge and its neighbors
            ')' => self.memory.set_value(self.memory.get_value() + 1),
            '(' => self.memory.set_value(self.memory.get_value() - 1),
            '+' => self
                .memory
                .set_value(self.memory.get_left() + self.memory.get_right()),
            '-' => self
                .memory
                .set_value(self.memory.get_left() - self.memory.get_right()),
            '*' => self
                .memory
                .set_value(self.memory.get_left() * self.memory.get_right()),
            '~' => self.memory.set_value(-self.memory.get_value()),

            ':' | '%' => {
                let left = self.memory.get_left();
                let right = self.memory.get_right();
                if right.is_zero() {
                    if !self.simulation {
                        self.termination = Some(Termination::DivisionByZero);
                        self.ticks += 1;
                        return;
                    }
                } else if opcode == ':' {
                    self.memory.set_value(ruby_style_divide(&left, &right));
                } else {
                    self.memory.set_value(ruby_style_remainder(&left, &right));
                }
            }

            // Memory pointer movement
            '{' => self.memory.move_left(),
            '}' => self.memory.move_right(),
            '=' => self.memory.reverse(),
            '"' => {
                self.memory.reverse();
                self.memory.move_right();
                self.memory.reverse();
            }
            '\'' => {
                self.memory.reverse();
                self.memory.move_left();
                self.memory.reverse();
            }
            '^' => {
                if self.memory.get_value().is_positive() {
                    self.memory.move_right();
                } else {
                    self.memory.move_left();
                }
            }
            '&' => {
                if self.memory.get_value().is_positive() {
                    self.memory.set_value(self.memory.get_right());
                } else {
                    self.memory.set_value(self.memory.get_left());
                }
            }

            // I/O
            ',' => {
                let value = match self.read_byte() {
                    Some(c) => BigInt::from(c as u32),
                    None => BigInt::from(-1),
                };
                self.memory.set_value(value);
            }
            ';' => {
                let byte = ((self.memory.get_value() % 256u16 + 256u16) % 256u16)
                    .to_u8()
                    .unwrap_or(0);
                self.output.push(byte);
            }
            '?' => {
                let value = self.find_integer();
                self.memory.set_value(value);
            }
            '!' => {
                let value = self.memory.get_value();
                self.output.extend_from_slice(value.to_string().as_bytes());
            }

            // Mirrors and branches
            '_' => self.set_dir(self.dir().reflect_at_underscore()),
            '|' => self.set_dir(self.dir().reflect_at_pipe()),
            '/' => self.set_dir(self.dir().reflect_at_slash()),
            '\\' => self.set_dir(self.dir().reflect_at_backslash()),
            '<' => {
                let positive = self.memory.get_value().is_positive();
                self.set_dir(self.dir().reflect_at_less_than(positive));
            }
            '>' => {
                let positive = self.memory.get_value().is_positive();
                self.set_dir(self.dir().reflect_at_greater_than(positive));
            }

            // Instruction pointer switching
            ']' => {
                if !self.simulation {
                    new_ip = (self.active_ip + 1) % 6;
                }
            }
            '[' => {
                if !self.simulation {
                    new_ip = (self.active_ip + 5) % 6;
                }
            }
            '#' => {
                if !self.simulation {
                    new_ip = ((self.memory.get_value() % 6u8 + 6u8) % 6u8)
                        .to_usize()
                        .unwrap_or(0);
                }
            }

            // Teleport: one extra move now, replacing the post-dispatch move
            '$' => {
                if !self.reverse {
                    self.handle_movement();
                }
            }

            // Digits build multi-digit literals, preserving the sign
            digit @ '0'..='9' => {
                let digit = BigInt::from(digit as u32 - '0' as u32);
                let value = self.memory.get_value();
                let signed = if value.is_negative() { -digit } else { digit };
                self.memory.set_value(value * 10 + signed);
            }

            // Any other codepoint is its own literal
            other => self.memory.set_value(other as u32),
        }

        if !self.reverse {
            self.handle_movement();
        }
        self.active_ip = new_ip;
        self.ticks += 1;
    }

    fn follow_edge(&mut self, edge_type: char, is_branch: bool) {
        if let Some(handler) = self.edge_handler.as_mut() {
            let name = format!(
                "{},{},{}",
                self.ips[self.active_ip], self.ip_dirs[self.active_ip], edge_type
            );
            handler(&name, is_branch);
        }
    }

    /// Advance the active pointer one cell, then resolve hex-edge
    /// wraparound and corner teleportation.
    fn handle_movement(&mut self) {
        let next = self.coords().add(self.dir().vector());
        self.set_coords(next);

        // A size-1 hexagon is a single cell; every direction loops back.
        if self.size == 1 {
            self.set_coords(PointAxial::new(0, 0));
            return;
        }

        let size = self.size as i64;
        let x = next.q;
        let z = next.r;
        let y = -x - z;

        if x.abs().max(y.abs()).max(z.abs()) < size {
            return;
        }

        let x_bigger = x.abs() >= size;
        let y_bigger = y.abs() >= size;
        let z_bigger = z.abs() >= size;

        // Undo the move; the remap formulas work on the last in-range cell.
        let coords = self.coords().subtract(self.dir().vector());
        self.set_coords(coords);

        // Two axes still in range: wrapping around an edge, not a corner.
        if !x_bigger && !y_bigger {
            self.follow_edge('0', false);
            self.set_coords(PointAxial::new(coords.q + coords.r, -coords.r));
        } else if !y_bigger && !z_bigger {
            self.follow_edge('0', false);
            self.set_coords(PointAxial::new(-coords.q, coords.q + coords.r));
        } else if !z_bigger && !x_bigger {
            self.follow_edge('0', false);
            self.set_coords(PointAxial::new(-coords.r, -coords.q));
        } else {
            // Two axes out of range: a corner. The destination depends on
            // the sign of the current memory value.
            let is_positive = self.memory.get_value().is_positive();
            self.follow_edge(if is_positive { '+' } else { '-' }, true);

            if !x_bigger && !is_positive || !y_bigger && is_positive {
                self.set_coords(PointAxial::new(coords.q + coords.r, -coords.r));
            } else if !y_bigger || !z_bigger && is_positive {
                self.set_coords(PointAxial::new(-coords.q, coords.q + coords.r));
            } else if !z_bigger || !x_bigger {
                self.set_coords(PointAxial::new(-coords.r, -coords.q));
            }
        }
    }

    /// Scan the next signed decimal integer from input. Leading bytes that
    /// are not digits or signs are consumed; the terminating non-digit is
    /// left in place.
    fn find_integer(&mut self) -> BigInt {
        let mut value = BigInt::zero();
        let mut positive = true;

        loop {
            match self.peek_byte() {
                Some('+') | None => {
                    self.read_byte();
                    break;
                }
                Some('-') => {
                    positive = false;
                    self.read_byte();
                    break;
                }
                Some(c) if c.is_ascii_digit() => break,
                Some(_) => {
                    self.read_byte();
                }
            }
        }

        while let Some(c) = self.peek_byte() {
            match c.to_digit(10) {
                Some(digit) => {
                    value = value * 10 + digit;
                    self.read_byte();
                }
                None => break,
            }
        }

        if positive {
            value
        } else {
            -value
        }
    }

    fn peek_byte(&self) -> Option<char> {
        self.input.get(self.input_position).copied()
    }

    fn read_byte(&mut self) -> Option<char> {
        let byte = self.input.get(self.input_position).copied();
        if byte.is_some() {
            self.input_position += 1;
        }
        byte
    }

    /// Hexagon edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The program currently executing.
    pub fn source(&self) -> &SourceCode {
        &self.source
    }

    /// Read access to the memory grid, pointer state, and change counters.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Position and heading of an instruction pointer.
    pub fn get_ip_state(&self, index: usize) -> (PointAxial, Direction) {
        (self.ips[index], self.ip_dirs[index])
    }

    /// Index of the pointer that executes on the next step.
    pub fn active_ip(&self) -> usize {
        self.active_ip
    }

    /// Executed instruction count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Everything the program has written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// How much input has been consumed.
    pub fn input_position(&self) -> usize {
        self.input_position
    }

    /// Why execution stopped, or `None` while running.
    pub fn termination_reason(&self) -> Option<Termination> {
        self.termination
    }

    /// Capture the full execution state for external step-back layering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ips: self.ips,
            ip_dirs: self.ip_dirs,
            active_ip: self.active_ip,
            ticks: self.ticks,
            memory: self.memory.clone(),
            output: self.output.clone(),
            input_position: self.input_position,
            termination: self.termination,
        }
    }

    /// Restore state captured by [`snapshot`](Interpreter::snapshot). The
    /// source grid and input text are not part of a snapshot and keep
    /// their current values.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.ips = snapshot.ips;
        self.ip_dirs = snapshot.ip_dirs;
        self.active_ip = snapshot.active_ip;
        self.ticks = snapshot.ticks;
        self.memory = snapshot.memory.clone();
        self.output = snapshot.output.clone();
        self.input_position = snapshot.input_position;
        self.termination = snapshot.termination;
    }
}

/// Floor division matching Ruby's `/`, which the language inherited from
/// its reference interpreter. Truncated quotients round toward negative
/// infinity when the signs differ.
fn ruby_style_divide(left: &BigInt, right: &BigInt) -> BigInt {
    let result = left / right;
    if left.is_negative() != right.is_negative() && !(left % right).is_zero() {
        result - 1
    } else {
        result
    }
}

/// Remainder matching Ruby's `%`: the result takes the divisor's sign.
fn ruby_style_remainder(left: &BigInt, right: &BigInt) -> BigInt {
    let result = left % right;
    if left.is_negative() != right.is_negative() && !result.is_zero() {
        result + right
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn ruby_division_floors_toward_negative_infinity() {
        assert_eq!(ruby_style_divide(&big(-5), &big(15)), big(-1));
        assert_eq!(ruby_style_divide(&big(5), &big(-15)), big(-1));
        assert_eq!(ruby_style_divide(&big(5), &big(15)), big(0));
        assert_eq!(ruby_style_divide(&big(-5), &big(-15)), big(0));
        assert_eq!(ruby_style_divide(&big(-15), &big(5)), big(-3));
        assert_eq!(ruby_style_divide(&big(7), &big(2)), big(3));
    }

    #[test]
    fn ruby_remainder_takes_the_divisor_sign() {
        assert_eq!(ruby_style_remainder(&big(-5), &big(15)), big(10));
        assert_eq!(ruby_style_remainder(&big(5), &big(-15)), big(-10));
        assert_eq!(ruby_style_remainder(&big(5), &big(15)), big(5));
        assert_eq!(ruby_style_remainder(&big(-5), &big(-15)), big(-5));
        assert_eq!(ruby_style_remainder(&big(-15), &big(5)), big(0));
    }
}

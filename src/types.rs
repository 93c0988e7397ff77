//! This module defines the core data structures and types shared by the interpreter,
//! including head directions, step results, run outcomes, configurations, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The blank symbol used when a description does not name one explicitly.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The maximum allowed size for a machine description in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The maximum number of steps to execute before a run is cut off.
pub const MAX_EXECUTION_STEPS: usize = 10000;
/// The number of cells shown on each side of the head when rendering a tape.
pub const DEFAULT_CONTEXT: usize = 10;

/// The serializable description of a machine, M = (Q, Σ, Γ, δ, q0, B, F).
///
/// This is the shape of the JSON description format; it carries no run state and
/// is only checked for well-formedness when turned into a `TuringMachine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// The finite set of states.
    pub states: BTreeSet<String>,
    /// Symbols allowed in an input string.
    pub input_alphabet: BTreeSet<char>,
    /// Symbols allowed on the tape; must include the input alphabet and the blank.
    pub tape_alphabet: BTreeSet<char>,
    /// The transition rules, one entry per (state, symbol) pair.
    pub transitions: Vec<TransitionEntry>,
    /// The state every run starts in.
    pub initial_state: String,
    /// The symbol read from every cell that was never written.
    #[serde(default = "default_blank_symbol")]
    pub blank_symbol: char,
    /// States in which the machine halts and accepts.
    pub accept_states: BTreeSet<String>,
}

fn default_blank_symbol() -> char {
    DEFAULT_BLANK_SYMBOL
}

impl MachineDefinition {
    /// Serializes the description as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TuringMachineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A single transition rule as it appears in a description.
///
/// The direction is kept as its textual code here and checked when the table is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub current_state: String,
    pub read_symbol: char,
    pub next_state: String,
    pub write_symbol: char,
    pub direction: String,
}

impl TransitionEntry {
    pub fn new(
        current_state: &str,
        read_symbol: char,
        next_state: &str,
        write_symbol: char,
        direction: Direction,
    ) -> Self {
        Self {
            current_state: current_state.to_string(),
            read_symbol,
            next_state: next_state.to_string(),
            write_symbol,
            direction: direction.code().to_string(),
        }
    }
}

/// Represents the possible directions the tape head can move.
///
/// Serialized as the canonical single-letter codes `"L"` and `"R"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    #[serde(rename = "L")]
    Left,
    /// Move the head one position to the right.
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    /// Returns the single-letter code for this direction.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
        }
    }

    /// Returns the signed offset applied to the head position.
    pub fn offset(&self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl FromStr for Direction {
    type Err = TuringMachineError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "L" => Ok(Direction::Left),
            "R" => Ok(Direction::Right),
            other => Err(TuringMachineError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A transition fired and the machine may continue.
    Continue,
    /// The machine can make no further progress.
    Halt(Halt),
}

/// The reason a machine stopped making progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The current state is an accept state.
    Accepted,
    /// No transition is defined for the current state and symbol.
    NoTransition,
}

/// Final classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => f.write_str("accepted"),
            Outcome::Rejected => f.write_str("rejected"),
        }
    }
}

/// A snapshot of the machine at one point of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// The state the machine was in.
    pub state: String,
    /// The head position, which may be negative.
    pub head: i64,
    /// The rendered tape window, cells on the first line and the head pointer on the second.
    pub tape: String,
}

/// Represents various errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The static definition is malformed (unknown initial state, alphabet mismatch, ...).
    #[error("Invalid machine definition: {0}")]
    InvalidDefinition(String),
    /// The input string contains a character outside the input alphabet.
    #[error("Symbol '{0}' is not in the input alphabet")]
    InvalidSymbol(char),
    /// A direction code other than `L` or `R` was supplied.
    #[error("Direction must be 'L' or 'R', got {0:?}")]
    InvalidDirection(String),
    /// The run state was queried before any input was loaded.
    #[error("Machine has not been initialized with an input string")]
    NotInitialized,
    /// Indicates an error during the parsing of a machine description.
    #[error("Description parsing error: {0}")]
    ParseError(String),
    /// Indicates an error related to file system operations, such as reading description files.
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::ParseError(error.to_string())
    }
}

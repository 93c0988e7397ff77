//! This crate provides the core logic for a deterministic single-tape Turing Machine
//! interpreter. It includes the tape and transition table, the execution engine,
//! a JSON description loader, built-in example programs, and trace formatting.

pub mod loader;
pub mod machine;
pub mod programs;
pub mod report;
pub mod tape;
pub mod transition;
pub mod types;

/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports `ProgramInfo` and `ProgramManager` from the programs module.
pub use programs::{ProgramInfo, ProgramManager};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the transition table types from the transition module.
pub use transition::{Action, TransitionFunction};
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Configuration, Direction, Halt, MachineDefinition, Outcome, Step, TransitionEntry,
    TuringMachineError, DEFAULT_CONTEXT, MAX_EXECUTION_STEPS, MAX_PROGRAM_SIZE,
};

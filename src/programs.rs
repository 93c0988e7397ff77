use crate::loader::ProgramLoader;
use crate::machine::TuringMachine;
use crate::types::{MachineDefinition, Outcome, TuringMachineError};

use std::sync::RwLock;
use tracing::error;

/// Name of the built-in machine deciding "equal number of 0s and 1s".
pub const BALANCED_ZEROS_ONES: &str = "Balanced 0s and 1s";

// Default embedded programs
const PROGRAM_TEXTS: [(&str, &str); 1] = [(
    BALANCED_ZEROS_ONES,
    include_str!("../machines/balanced-zeros-ones.json"),
)];

/// Inputs exercised by the sample suite of the built-in machine.
pub const SAMPLE_INPUTS: [SampleInput; 7] = [
    SampleInput::new("", "Empty string", Outcome::Accepted),
    SampleInput::new("01", "One pair", Outcome::Accepted),
    SampleInput::new("0011", "Two 0s, two 1s", Outcome::Accepted),
    SampleInput::new("001", "More 0s than 1s", Outcome::Rejected),
    SampleInput::new("1100", "1s before 0s", Outcome::Rejected),
    SampleInput::new("0101", "Two alternating pairs", Outcome::Accepted),
    SampleInput::new("000111", "Three 0s, three 1s", Outcome::Accepted),
];

lazy_static::lazy_static! {
    static ref PROGRAMS: RwLock<Vec<Program>> = RwLock::new(Vec::new());
}

/// A named machine description.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub definition: MachineDefinition,
}

/// An input for the sample suite and the outcome the built-in machine should produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleInput {
    pub input: &'static str,
    pub description: &'static str,
    pub expected: Outcome,
}

impl SampleInput {
    const fn new(input: &'static str, description: &'static str, expected: Outcome) -> Self {
        Self {
            input,
            description,
            expected,
        }
    }
}

pub struct ProgramManager;

impl ProgramManager {
    /// Parses the embedded descriptions into the registry, replacing its contents.
    ///
    /// Fails with the parse error of the first embedded description that is invalid;
    /// the registry is left unchanged in that case.
    pub fn load() -> Result<(), TuringMachineError> {
        let programs = parse_programs(&PROGRAM_TEXTS)?;
        *PROGRAMS.write().map_err(poisoned)? = programs;

        Ok(())
    }

    /// Runs `f` over the registry, loading it first if it is still empty.
    fn with_programs<T>(f: impl FnOnce(&[Program]) -> T) -> Result<T, TuringMachineError> {
        let empty = PROGRAMS.read().map_err(poisoned)?.is_empty();
        if empty {
            Self::load()?;
        }

        let programs = PROGRAMS.read().map_err(poisoned)?;
        Ok(f(&programs))
    }

    pub fn get_program_count() -> Result<usize, TuringMachineError> {
        Self::with_programs(|programs| programs.len())
    }

    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        Self::with_programs(|programs| programs.get(index).cloned())?.ok_or_else(|| {
            TuringMachineError::InvalidDefinition(format!("Program index {} out of range", index))
        })
    }

    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        Self::with_programs(|programs| programs.iter().find(|p| p.name == name).cloned())?
            .ok_or_else(|| {
                TuringMachineError::InvalidDefinition(format!("Program '{}' not found", name))
            })
    }

    pub fn list_program_names() -> Result<Vec<String>, TuringMachineError> {
        Self::with_programs(|programs| programs.iter().map(|p| p.name.clone()).collect())
    }

    /// Summarizes the built-in program at `index` for listings.
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            initial_state: program.definition.initial_state.clone(),
            state_count: program.definition.states.len(),
            transition_count: program.definition.transitions.len(),
            name: program.name,
        })
    }

    /// Builds the machine accepting strings with as many 0s as 1s, every 0 matched
    /// by a later 1.
    pub fn balanced_zeros_ones() -> Result<TuringMachine, TuringMachineError> {
        let program = Self::get_program_by_name(BALANCED_ZEROS_ONES)?;
        TuringMachine::from_definition(&program.definition)
    }
}

fn parse_programs(texts: &[(&str, &str)]) -> Result<Vec<Program>, TuringMachineError> {
    texts
        .iter()
        .map(|&(name, text)| {
            let definition = ProgramLoader::load_program_from_string(text).inspect_err(|e| {
                error!(program = name, error = %e, "failed to parse embedded program")
            })?;

            Ok(Program {
                name: name.to_string(),
                definition,
            })
        })
        .collect()
}

fn poisoned<E>(_: E) -> TuringMachineError {
    TuringMachineError::FileError("Program registry lock is poisoned".to_string())
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

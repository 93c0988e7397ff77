//! Human-readable rendering of machines and runs. Everything here reads the public
//! `TuringMachine` API and never changes it.

use crate::machine::TuringMachine;
use crate::types::{Configuration, TuringMachineError};
use std::collections::BTreeSet;
use std::fmt::Display;

const RULE: &str = "======================================================================";

fn join<T: Display>(items: &BTreeSet<T>) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("{{{}}}", items.join(", "))
}

/// Formats one configuration of a run, indenting the tape pointer under its window.
pub fn format_configuration(step: usize, configuration: &Configuration) -> String {
    let mut lines = configuration.tape.lines();
    let cells = lines.next().unwrap_or_default();
    let pointer = lines.next().unwrap_or_default();

    format!(
        "--- Step {} ---\nState: {}\nTape: {}\n      {}\n",
        step, configuration.state, cells, pointer
    )
}

/// Formats every configuration recorded for the current run.
pub fn format_trace(machine: &TuringMachine) -> Result<String, TuringMachineError> {
    Ok(machine
        .history()?
        .iter()
        .enumerate()
        .map(|(step, configuration)| format_configuration(step, configuration) + "\n")
        .collect())
}

/// Formats the classification of the current run along with its final state and step count.
pub fn format_outcome(machine: &TuringMachine) -> Result<String, TuringMachineError> {
    let outcome = machine.result()?;
    let state = machine.state()?;
    let steps = machine.step_count()?;

    let detail = if outcome.is_accepted() {
        format!("Input accepted in state: {}", state)
    } else {
        format!("Machine halted in state: {}", state)
    };

    Ok(format!(
        "RESULT: {}\n{}\nTotal steps: {}",
        outcome.to_string().to_uppercase(),
        detail,
        steps
    ))
}

/// Formats the banner printed before a run starts.
pub fn format_header(machine: &TuringMachine, input: &str) -> String {
    format!(
        "{}\nRUNNING TURING MACHINE\n{}\nInput: {:?}\nInitial state: {}\n{}",
        RULE,
        RULE,
        input,
        machine.initial_state(),
        RULE
    )
}

/// Formats an overview of the formal definition M = (Q, Σ, Γ, δ, q0, B, F).
pub fn format_summary(machine: &TuringMachine) -> String {
    format!(
        "- States ({}): {}\n- Input alphabet: {}\n- Tape alphabet: {}\n- Transitions: {}\n- Initial state: {}\n- Blank symbol: {}\n- Accept states: {}",
        machine.states().len(),
        join(machine.states()),
        join(machine.input_alphabet()),
        join(machine.tape_alphabet()),
        machine.transitions().len(),
        machine.initial_state(),
        machine.blank(),
        join(machine.accept_states()),
    )
}

/// Formats the transition table, one rule per line.
pub fn format_transitions(machine: &TuringMachine) -> String {
    machine
        .transitions()
        .iter()
        .map(|(state, symbol, action)| {
            format!(
                "δ({}, {}) = ({}, {}, {})",
                state, symbol, action.next_state, action.write, action.direction
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

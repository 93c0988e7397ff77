//! This module defines the `TuringMachine` struct, which simulates a deterministic
//! single-tape Turing Machine. It validates the formal definition, owns the run state
//! (current state, tape, step counter and configuration history) and executes transitions.

use crate::tape::Tape;
use crate::transition::TransitionFunction;
use crate::types::{
    Configuration, Halt, MachineDefinition, Outcome, Step, TransitionEntry, TuringMachineError,
    DEFAULT_CONTEXT,
};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

/// Represents a deterministic single-tape Turing Machine.
///
/// The formal definition is fixed at construction. The run state only exists after
/// [`reset`](Self::reset) and is replaced wholesale by every later reset.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    states: BTreeSet<String>,
    input_alphabet: BTreeSet<char>,
    tape_alphabet: BTreeSet<char>,
    transitions: TransitionFunction,
    initial_state: String,
    blank: char,
    accept_states: BTreeSet<String>,
    context: usize,
    run: Option<Run>,
}

#[derive(Debug, Clone)]
struct Run {
    state: String,
    tape: Tape,
    step_count: usize,
    history: Vec<Configuration>,
}

impl Run {
    fn record(&mut self, context: usize) {
        self.history.push(Configuration {
            state: self.state.clone(),
            head: self.tape.head(),
            tape: self.tape.render(context),
        });
    }
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from its formal components.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidDefinition)` if the initial state or an accept state
    ///   is not a declared state, if the input alphabet is not contained in the tape alphabet,
    ///   or if the blank symbol is not a tape symbol.
    pub fn new(
        states: BTreeSet<String>,
        input_alphabet: BTreeSet<char>,
        tape_alphabet: BTreeSet<char>,
        transitions: TransitionFunction,
        initial_state: &str,
        blank: char,
        accept_states: BTreeSet<String>,
    ) -> Result<Self, TuringMachineError> {
        let machine = Self {
            states,
            input_alphabet,
            tape_alphabet,
            transitions,
            initial_state: initial_state.to_string(),
            blank,
            accept_states,
            context: DEFAULT_CONTEXT,
            run: None,
        };

        machine.validate()?;
        machine.lint();

        Ok(machine)
    }

    /// Builds a machine from a serializable description.
    ///
    /// Direction codes are parsed first, so a bad code fails with
    /// `InvalidDirection` before the structural checks run.
    pub fn from_definition(definition: &MachineDefinition) -> Result<Self, TuringMachineError> {
        let mut transitions = TransitionFunction::new();
        for entry in &definition.transitions {
            transitions.add_coded(
                &entry.current_state,
                entry.read_symbol,
                &entry.next_state,
                entry.write_symbol,
                &entry.direction,
            )?;
        }

        Self::new(
            definition.states.clone(),
            definition.input_alphabet.clone(),
            definition.tape_alphabet.clone(),
            transitions,
            &definition.initial_state,
            definition.blank_symbol,
            definition.accept_states.clone(),
        )
    }

    /// Exports the formal definition. Feeding the result back into
    /// [`from_definition`](Self::from_definition) yields an equivalent machine.
    pub fn definition(&self) -> MachineDefinition {
        MachineDefinition {
            states: self.states.clone(),
            input_alphabet: self.input_alphabet.clone(),
            tape_alphabet: self.tape_alphabet.clone(),
            transitions: self
                .transitions
                .iter()
                .map(|(state, symbol, action)| {
                    TransitionEntry::new(
                        state,
                        symbol,
                        &action.next_state,
                        action.write,
                        action.direction,
                    )
                })
                .collect(),
            initial_state: self.initial_state.clone(),
            blank_symbol: self.blank,
            accept_states: self.accept_states.clone(),
        }
    }

    fn validate(&self) -> Result<(), TuringMachineError> {
        if !self.states.contains(&self.initial_state) {
            return Err(TuringMachineError::InvalidDefinition(format!(
                "initial state '{}' is not in the set of states",
                self.initial_state
            )));
        }

        let unknown: Vec<&String> = self.accept_states.difference(&self.states).collect();
        if !unknown.is_empty() {
            return Err(TuringMachineError::InvalidDefinition(format!(
                "accept states {:?} are not in the set of states",
                unknown
            )));
        }

        let missing: Vec<&char> = self
            .input_alphabet
            .difference(&self.tape_alphabet)
            .collect();
        if !missing.is_empty() {
            return Err(TuringMachineError::InvalidDefinition(format!(
                "input symbols {:?} are not in the tape alphabet",
                missing
            )));
        }

        if !self.tape_alphabet.contains(&self.blank) {
            return Err(TuringMachineError::InvalidDefinition(format!(
                "blank symbol '{}' is not in the tape alphabet",
                self.blank
            )));
        }

        Ok(())
    }

    /// Reports transitions that can never match or lead outside the declared sets.
    /// These are legal, so they are only logged.
    fn lint(&self) {
        for (state, symbol, action) in self.transitions.iter() {
            if !self.states.contains(state) || !self.states.contains(&action.next_state) {
                warn!(
                    state,
                    next_state = %action.next_state,
                    "transition references an undeclared state"
                );
            }
            if !self.tape_alphabet.contains(&symbol) || !self.tape_alphabet.contains(&action.write)
            {
                warn!(
                    state,
                    read = %symbol,
                    write = %action.write,
                    "transition uses a symbol outside the tape alphabet"
                );
            }
        }

        for state in &self.accept_states {
            if self.transitions.iter().any(|(from, _, _)| from == state) {
                warn!(state = %state, "accept state has outgoing transitions that never fire");
            }
        }
    }

    /// Loads `input` onto a fresh tape and returns the machine to its initial state.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidSymbol)` if `input` has a character outside the
    ///   input alphabet. The previous run, if any, is left untouched.
    pub fn reset(&mut self, input: &str) -> Result<(), TuringMachineError> {
        if let Some(symbol) = input.chars().find(|c| !self.input_alphabet.contains(c)) {
            return Err(TuringMachineError::InvalidSymbol(symbol));
        }

        let mut run = Run {
            state: self.initial_state.clone(),
            tape: Tape::new(input, self.blank),
            step_count: 0,
            history: Vec::new(),
        };
        run.record(self.context);
        self.run = Some(run);

        debug!(input, state = %self.initial_state, "machine reset");

        Ok(())
    }

    /// Executes a single step of the computation.
    ///
    /// An accept state halts the machine before the transition table is consulted,
    /// so transitions out of accept states never fire.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if a transition fired.
    /// * `Ok(Step::Halt(Halt::Accepted))` if the current state is an accept state.
    /// * `Ok(Step::Halt(Halt::NoTransition))` if no rule matches the current state and symbol.
    /// * `Err(TuringMachineError::NotInitialized)` if `reset` was never called.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        let run = self.run.as_mut().ok_or(TuringMachineError::NotInitialized)?;

        if self.accept_states.contains(&run.state) {
            return Ok(Step::Halt(Halt::Accepted));
        }

        let symbol = run.tape.read();
        let Some(action) = self.transitions.lookup(&run.state, symbol) else {
            debug!(state = %run.state, symbol = %symbol, steps = run.step_count, "no transition");
            return Ok(Step::Halt(Halt::NoTransition));
        };

        run.tape.write(action.write);
        run.tape.move_head(action.direction);
        run.state = action.next_state.clone();
        run.step_count += 1;
        run.record(self.context);

        trace!(
            step = run.step_count,
            state = %run.state,
            head = run.tape.head(),
            read = %symbol,
            write = %action.write,
            "transition"
        );

        Ok(Step::Continue)
    }

    /// Resets the machine with `input` and steps until it halts or `max_steps` steps
    /// have been taken.
    ///
    /// A run cut off by the step budget is classified as rejected.
    pub fn run(&mut self, input: &str, max_steps: usize) -> Result<Outcome, TuringMachineError> {
        self.reset(input)?;

        while self.step_count()? < max_steps {
            if let Step::Halt(_) = self.step()? {
                break;
            }
        }

        let outcome = self.result()?;
        debug!(outcome = %outcome, steps = self.step_count()?, "run finished");

        Ok(outcome)
    }

    /// Classifies the current configuration: accepted if the machine is in an
    /// accept state, rejected otherwise.
    pub fn result(&self) -> Result<Outcome, TuringMachineError> {
        let run = self.current_run()?;
        if self.accept_states.contains(&run.state) {
            Ok(Outcome::Accepted)
        } else {
            Ok(Outcome::Rejected)
        }
    }

    /// Returns the current state of the run.
    pub fn state(&self) -> Result<&str, TuringMachineError> {
        Ok(&self.current_run()?.state)
    }

    /// Returns the number of transitions taken since the last reset.
    pub fn step_count(&self) -> Result<usize, TuringMachineError> {
        Ok(self.current_run()?.step_count)
    }

    /// Returns every configuration of the run, starting with the initial one.
    pub fn history(&self) -> Result<&[Configuration], TuringMachineError> {
        Ok(&self.current_run()?.history)
    }

    /// Returns the tape of the run.
    pub fn tape(&self) -> Result<&Tape, TuringMachineError> {
        Ok(&self.current_run()?.tape)
    }

    fn current_run(&self) -> Result<&Run, TuringMachineError> {
        self.run.as_ref().ok_or(TuringMachineError::NotInitialized)
    }

    /// Sets how many cells around the head each recorded snapshot shows.
    /// Applies to configurations recorded from now on.
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> usize {
        self.context
    }

    pub fn is_accept_state(&self, state: &str) -> bool {
        self.accept_states.contains(state)
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &BTreeSet<char> {
        &self.input_alphabet
    }

    pub fn tape_alphabet(&self) -> &BTreeSet<char> {
        &self.tape_alphabet
    }

    pub fn transitions(&self) -> &TransitionFunction {
        &self.transitions
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn accept_states(&self) -> &BTreeSet<String> {
        &self.accept_states
    }
}

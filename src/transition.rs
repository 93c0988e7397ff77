//! This module provides the `TransitionFunction`, the deterministic partial function
//! mapping a (state, symbol) pair to the action the machine takes next.

use crate::types::{Direction, TuringMachineError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the machine does when a transition fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The state the machine moves into.
    pub next_state: String,
    /// The symbol written over the one just read.
    pub write: char,
    /// Where the head moves after writing.
    pub direction: Direction,
}

/// An exact-match transition table.
///
/// Each (state, symbol) key has at most one action, so lookups are deterministic.
/// Adding a key that already exists replaces the previous action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionFunction {
    rules: BTreeMap<String, BTreeMap<char, Action>>,
}

impl TransitionFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the action for (`state`, `symbol`), overwriting any previous one.
    pub fn add(
        &mut self,
        state: &str,
        symbol: char,
        next_state: &str,
        write: char,
        direction: Direction,
    ) {
        self.rules.entry(state.to_string()).or_default().insert(
            symbol,
            Action {
                next_state: next_state.to_string(),
                write,
                direction,
            },
        );
    }

    /// Like [`add`](Self::add), but takes the direction as its `L`/`R` code.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidDirection)` if `code` is neither `L` nor `R`.
    ///   The table is left unchanged in that case.
    pub fn add_coded(
        &mut self,
        state: &str,
        symbol: char,
        next_state: &str,
        write: char,
        code: &str,
    ) -> Result<(), TuringMachineError> {
        let direction = code.parse()?;
        self.add(state, symbol, next_state, write, direction);
        Ok(())
    }

    /// Returns the action for (`state`, `symbol`), or `None` when no rule applies.
    pub fn lookup(&self, state: &str, symbol: char) -> Option<&Action> {
        self.rules.get(state)?.get(&symbol)
    }

    pub fn contains(&self, state: &str, symbol: char) -> bool {
        self.lookup(state, symbol).is_some()
    }

    /// Returns the number of (state, symbol) entries.
    pub fn len(&self) -> usize {
        self.rules.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all entries, sorted by state and then by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (&str, char, &Action)> {
        self.rules.iter().flat_map(|(state, actions)| {
            actions
                .iter()
                .map(move |(&symbol, action)| (state.as_str(), symbol, action))
        })
    }
}

//! This module provides the `ProgramLoader` struct, responsible for loading machine
//! descriptions from JSON files and strings.

use crate::machine::TuringMachine;
use crate::types::{MachineDefinition, TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `ProgramLoader` is a utility struct for loading machine descriptions.
/// It only deserializes; every semantic check happens when the description is
/// turned into a `TuringMachine`.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is successfully read and deserialized.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TuringMachineError::ParseError)` if the content is not a valid description.
    pub fn load_program(path: &Path) -> Result<MachineDefinition, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = content.len(), "loading description");

        Self::load_program_from_string(&content)
    }

    /// Loads a single machine description from the provided string content.
    pub fn load_program_from_string(content: &str) -> Result<MachineDefinition, TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "Description is {} bytes, the limit is {}",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        Ok(serde_json::from_str(content)?)
    }

    /// Loads a description from `path` and builds the machine it describes.
    pub fn load_machine(path: &Path) -> Result<TuringMachine, TuringMachineError> {
        TuringMachine::from_definition(&Self::load_program(path)?)
    }

    /// Loads every `.json` description in a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each element of the
    /// result is either the path and its description or the error that file produced.
    pub fn load_programs(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                Some(Self::load_program(&path).map(|definition| (path, definition)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const SIMPLE: &str = r#"{
        "states": ["start", "stop"],
        "input_alphabet": ["a"],
        "tape_alphabet": ["a", "b", "_"],
        "transitions": [
            {"current_state": "start", "read_symbol": "a", "next_state": "stop",
             "write_symbol": "b", "direction": "R"}
        ],
        "initial_state": "start",
        "blank_symbol": "_",
        "accept_states": ["stop"]
    }"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "simple.json", SIMPLE);

        let definition = ProgramLoader::load_program(&path).unwrap();
        assert_eq!(definition.initial_state, "start");
        assert_eq!(definition.blank_symbol, '_');
        assert_eq!(definition.transitions.len(), 1);
        assert_eq!(definition.transitions[0].write_symbol, 'b');
    }

    #[test]
    fn test_load_machine_and_run() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "simple.json", SIMPLE);

        let mut machine = ProgramLoader::load_machine(&path).unwrap();
        assert_eq!(machine.run("a", 10), Ok(Outcome::Accepted));
        assert_eq!(machine.tape().unwrap().contents(), "b_");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ProgramLoader::load_program(Path::new("/nonexistent/machine.json"));
        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let result = ProgramLoader::load_program_from_string("{ \"states\": [");
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_field() {
        let content = SIMPLE.replace("\"initial_state\": \"start\",", "");
        let result = ProgramLoader::load_program_from_string(&content);
        assert!(
            matches!(result, Err(TuringMachineError::ParseError(msg)) if msg.contains("initial_state"))
        );
    }

    #[test]
    fn test_blank_symbol_defaults() {
        let content = SIMPLE.replace("\"blank_symbol\": \"_\",", "");
        let definition = ProgramLoader::load_program_from_string(&content).unwrap();
        assert_eq!(definition.blank_symbol, crate::types::DEFAULT_BLANK_SYMBOL);
    }

    #[test]
    fn test_load_multi_character_symbol() {
        let content = SIMPLE.replace("\"blank_symbol\": \"_\"", "\"blank_symbol\": \"__\"");
        let result = ProgramLoader::load_program_from_string(&content);
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_invalid_direction_surfaces_when_building() {
        let content = SIMPLE.replace("\"direction\": \"R\"", "\"direction\": \"N\"");
        let definition = ProgramLoader::load_program_from_string(&content).unwrap();

        assert_eq!(
            TuringMachine::from_definition(&definition).err(),
            Some(TuringMachineError::InvalidDirection("N".to_string()))
        );
    }

    #[test]
    fn test_load_oversized_description() {
        let content = " ".repeat(MAX_PROGRAM_SIZE + 1);
        let result = ProgramLoader::load_program_from_string(&content);
        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let definition = ProgramLoader::load_program_from_string(SIMPLE).unwrap();
        let json = definition.to_json().unwrap();

        assert_eq!(ProgramLoader::load_program_from_string(&json).unwrap(), definition);
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "one.json", SIMPLE);
        write_file(dir.path(), "two.json", "not json");
        write_file(dir.path(), "notes.txt", "ignored");
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let results = ProgramLoader::load_programs(dir.path());
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let results = ProgramLoader::load_programs(Path::new("/nonexistent/dir"));
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}

//! Drivers that run a machine and print what happened. They take their reader and
//! writer as parameters so the interactive modes can be exercised without a terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;
use tmi::programs::SAMPLE_INPUTS;
use tmi::report::{format_configuration, format_header, format_outcome, format_trace};
use tmi::{ProgramLoader, ProgramManager, Step, TuringMachine};

const RULE: &str = "----------------------------------------------------------------------";

/// Runs `input` to completion and prints the result, preceded by the full trace when
/// `trace` is set.
pub fn run_input<W: Write>(
    machine: &mut TuringMachine,
    input: &str,
    max_steps: usize,
    trace: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{}\n", format_header(machine, input))?;

    machine.run(input, max_steps)?;

    if trace {
        write!(out, "{}", format_trace(machine)?)?;
    }
    writeln!(out, "{}", format_outcome(machine)?)?;

    Ok(())
}

/// Steps through `input` one transition at a time, waiting for a line on `reader`
/// between steps.
pub fn run_step_by_step<R: BufRead, W: Write>(
    machine: &mut TuringMachine,
    input: &str,
    max_steps: usize,
    reader: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{}\n", format_header(machine, input))?;

    machine.reset(input)?;
    writeln!(out, "{}", format_configuration(0, &machine.history()?[0]))?;

    while machine.step_count()? < max_steps {
        pause(reader, out)?;

        if let Step::Halt(_) = machine.step()? {
            break;
        }

        let steps = machine.step_count()?;
        writeln!(out, "{}", format_configuration(steps, &machine.history()?[steps]))?;
    }

    writeln!(out, "{}", format_outcome(machine)?)?;

    Ok(())
}

/// Runs every input in `inputs`, or the sample suite when `inputs` is empty.
///
/// An input the machine refuses is reported and the suite carries on.
pub fn run_suite<W: Write>(
    machine: &mut TuringMachine,
    inputs: &[String],
    max_steps: usize,
    out: &mut W,
) -> anyhow::Result<()> {
    let cases: Vec<(String, String, Option<String>)> = if inputs.is_empty() {
        SAMPLE_INPUTS
            .iter()
            .map(|sample| {
                (
                    sample.input.to_string(),
                    sample.description.to_string(),
                    Some(sample.expected.to_string()),
                )
            })
            .collect()
    } else {
        inputs
            .iter()
            .map(|input| (input.clone(), "User input".to_string(), None))
            .collect()
    };

    for (input, description, expected) in cases {
        writeln!(out, "Test: {}", description)?;
        writeln!(out, "Input: {:?}", input)?;

        match machine.run(&input, max_steps) {
            Ok(outcome) => {
                write!(out, "Outcome: {} after {} steps", outcome, machine.step_count()?)?;
                match expected {
                    Some(expected) if expected != outcome.to_string() => {
                        writeln!(out, " (expected {})", expected)?
                    }
                    _ => writeln!(out)?,
                }
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        writeln!(out, "{}", RULE)?;
    }

    Ok(())
}

/// Lists the built-in machines, then every description found in `directory` if given.
///
/// A description that fails to load is listed with its error.
pub fn list_programs<W: Write>(directory: Option<&Path>, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Built-in machines:")?;
    for index in 0..ProgramManager::get_program_count()? {
        let info = ProgramManager::get_program_info(index)?;
        writeln!(
            out,
            "  {}: {} (initial state {}, {} states, {} transitions)",
            info.index, info.name, info.initial_state, info.state_count, info.transition_count
        )?;
    }

    let Some(directory) = directory else {
        return Ok(());
    };

    writeln!(out, "\nDescriptions in {}:", directory.display())?;
    let mut results = ProgramLoader::load_programs(directory);
    results.sort_by(|a, b| match (a, b) {
        (Ok((a, _)), Ok((b, _))) => a.cmp(b),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });

    for result in results {
        match result {
            Ok((path, definition)) => writeln!(
                out,
                "  {} (initial state {}, {} states, {} transitions)",
                path.display(),
                definition.initial_state,
                definition.states.len(),
                definition.transitions.len()
            )?,
            Err(e) => writeln!(out, "  Error: {}", e)?,
        }
    }

    Ok(())
}

fn pause<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<()> {
    write!(out, "Press Enter to continue...")?;
    out.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tmi::{ProgramManager, MAX_EXECUTION_STEPS};

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_run_input_with_trace() {
        let mut machine = ProgramManager::balanced_zeros_ones().unwrap();
        let mut out = Vec::new();

        run_input(&mut machine, "01", MAX_EXECUTION_STEPS, true, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("Input: \"01\""));
        assert!(text.contains("--- Step 0 ---"));
        assert!(text.contains("RESULT: ACCEPTED"));
    }

    #[test]
    fn test_run_input_invalid_symbol() {
        let mut machine = ProgramManager::balanced_zeros_ones().unwrap();
        let mut out = Vec::new();

        let result = run_input(&mut machine, "012", MAX_EXECUTION_STEPS, false, &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_step_by_step_pauses_between_steps() {
        let mut machine = ProgramManager::balanced_zeros_ones().unwrap();
        let mut reader = Cursor::new("\n".repeat(10));
        let mut out = Vec::new();

        run_step_by_step(&mut machine, "", MAX_EXECUTION_STEPS, &mut reader, &mut out).unwrap();

        let text = output(out);
        // Two transitions, then one more pause before the halt is detected
        assert_eq!(text.matches("Press Enter").count(), 3);
        assert!(text.contains("--- Step 2 ---"));
        assert!(text.contains("RESULT: ACCEPTED"));
    }

    #[test]
    fn test_step_by_step_respects_budget() {
        let mut machine = ProgramManager::balanced_zeros_ones().unwrap();
        let mut reader = Cursor::new(String::new());
        let mut out = Vec::new();

        run_step_by_step(&mut machine, "0011", 3, &mut reader, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("--- Step 3 ---"));
        assert!(!text.contains("--- Step 4 ---"));
        assert!(text.contains("RESULT: REJECTED"));
    }

    #[test]
    fn test_sample_suite_matches_expectations() {
        let mut machine = ProgramManager::balanced_zeros_ones().unwrap();
        let mut out = Vec::new();

        run_suite(&mut machine, &[], MAX_EXECUTION_STEPS, &mut out).unwrap();

        let text = output(out);
        assert_eq!(text.matches("Test: ").count(), SAMPLE_INPUTS.len());
        assert!(!text.contains("expected"));
    }

    #[test]
    fn test_list_built_in_programs() {
        let mut out = Vec::new();

        list_programs(None, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("0: Balanced 0s and 1s (initial state q0, 6 states, 17 transitions)"));
        assert!(!text.contains("Descriptions in"));
    }

    #[test]
    fn test_list_programs_in_directory() {
        let machines = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../machines");
        let mut out = Vec::new();

        list_programs(Some(&machines), &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("balanced-zeros-ones.json (initial state q0"));
        assert!(!text.contains("Error"));
    }

    #[test]
    fn test_list_programs_missing_directory() {
        let mut out = Vec::new();

        list_programs(Some(Path::new("/nonexistent/dir")), &mut out).unwrap();

        assert!(output(out).contains("Error: "));
    }

    #[test]
    fn test_suite_reports_errors_and_continues() {
        let mut machine = ProgramManager::balanced_zeros_ones().unwrap();
        let inputs = vec!["0a".to_string(), "01".to_string()];
        let mut out = Vec::new();

        run_suite(&mut machine, &inputs, MAX_EXECUTION_STEPS, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("Error: Symbol 'a' is not in the input alphabet"));
        assert!(text.contains("Outcome: accepted"));
    }
}

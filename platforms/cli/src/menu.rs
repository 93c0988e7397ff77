//! The interactive text menu. Errors from a single run are printed and the menu
//! keeps going; only I/O failures end it early.

use crate::session::{run_input, run_step_by_step, run_suite};
use std::io::{BufRead, Write};
use tmi::report::format_summary;
use tmi::TuringMachine;
use tracing::debug;

const BANNER: &str = "\
==============================================================
               TURING MACHINE INTERPRETER
               M = (Q, Σ, Γ, δ, q0, B, F)
==============================================================";

#[derive(Debug, PartialEq)]
enum Choice {
    Run,
    StepByStep,
    Suite,
    Quit,
}

impl Choice {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "1" => Some(Choice::Run),
            "2" => Some(Choice::StepByStep),
            "3" => Some(Choice::Suite),
            "4" | "q" | "quit" => Some(Choice::Quit),
            _ => None,
        }
    }
}

/// Runs the menu until the user quits or `reader` is exhausted.
pub fn run<R: BufRead, W: Write>(
    machine: &mut TuringMachine,
    name: &str,
    max_steps: usize,
    reader: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{}\n", BANNER)?;
    writeln!(out, "Loaded machine: {}", name)?;
    writeln!(out, "{}", format_summary(machine))?;

    loop {
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. Run with an input string")?;
        writeln!(out, "2. Run step by step")?;
        writeln!(out, "3. Run the sample inputs")?;
        writeln!(out, "4. Quit")?;

        let Some(line) = prompt(reader, out, "\nSelect an option: ")? else {
            break;
        };

        let choice = Choice::parse(&line);
        debug!(?choice, "menu selection");

        let result = match choice {
            Some(Choice::Run) => match prompt(reader, out, "\nInput string: ")? {
                Some(input) => run_input(machine, input.trim(), max_steps, false, out),
                None => break,
            },
            Some(Choice::StepByStep) => match prompt(reader, out, "\nInput string: ")? {
                Some(input) => run_step_by_step(machine, input.trim(), max_steps, reader, out),
                None => break,
            },
            Some(Choice::Suite) => run_suite(machine, &[], max_steps, out),
            Some(Choice::Quit) => {
                writeln!(out, "\nGoodbye!")?;
                break;
            }
            None => {
                writeln!(out, "Invalid option, try again.")?;
                Ok(())
            }
        };

        if let Err(e) = result {
            writeln!(out, "Error: {}", e)?;
        }
    }

    Ok(())
}

/// Prints `message` and reads one line. Returns `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    message: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

mod logging;
mod menu;
mod session;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tmi::programs::BALANCED_ZEROS_ONES;
use tmi::report::{format_summary, format_transitions};
use tmi::{ProgramLoader, ProgramManager, TuringMachine, DEFAULT_CONTEXT, MAX_EXECUTION_STEPS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tmi-cli run 0011 --trace
  tmi-cli --program machine.json suite 01 10
  tmi-cli --context 3 step 01
  tmi-cli list --dir machines
  cat machine.json | tmi-cli --program - describe --json")]
struct Cli {
    /// Built-in machine name, machine description file (JSON), or `-` to read it
    /// from stdin. Defaults to the built-in balanced 0s and 1s machine.
    #[clap(short, long, global = true)]
    program: Option<String>,

    /// Maximum number of steps before a run is cut off and rejected
    #[clap(short, long, global = true, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Number of tape cells shown on each side of the head in snapshots
    #[clap(short, long, global = true, default_value_t = DEFAULT_CONTEXT)]
    context: usize,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in machines
    List {
        /// Also list the descriptions found in this directory
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    #[clap(flatten)]
    Machine(MachineCommand),
}

/// Subcommands that operate on the selected machine.
#[derive(Subcommand)]
enum MachineCommand {
    /// Run the machine on an input string
    Run {
        /// The input string
        input: String,

        /// Print every configuration of the run
        #[clap(short, long)]
        trace: bool,
    },
    /// Run the machine one step at a time, pausing for Enter
    Step {
        /// The input string
        input: String,
    },
    /// Run a list of inputs, or the built-in sample inputs when none are given
    Suite {
        inputs: Vec<String>,
    },
    /// Start the interactive menu
    Menu,
    /// Print the machine definition
    Describe {
        /// Print the definition as JSON
        #[clap(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Command::List { dir } => session::list_programs(dir.as_deref(), &mut io::stdout()),
        Command::Machine(command) => {
            let (name, machine) = load_machine(cli.program.as_deref())?;
            let mut machine = machine.with_context(cli.context);
            run_command(command, &name, &mut machine, cli.max_steps)
        }
    }
}

fn run_command(
    command: MachineCommand,
    name: &str,
    machine: &mut TuringMachine,
    max_steps: usize,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match command {
        MachineCommand::Run { input, trace } => {
            session::run_input(machine, &input, max_steps, trace, &mut stdout)?
        }
        MachineCommand::Step { input } => session::run_step_by_step(
            machine,
            &input,
            max_steps,
            &mut stdin.lock(),
            &mut stdout,
        )?,
        MachineCommand::Suite { inputs } => {
            session::run_suite(machine, &inputs, max_steps, &mut stdout)?
        }
        MachineCommand::Menu => {
            menu::run(machine, name, max_steps, &mut stdin.lock(), &mut stdout)?
        }
        MachineCommand::Describe { json } => {
            if json {
                println!("{}", machine.definition().to_json()?);
            } else {
                println!(
                    "{}\n{}\n\n{}",
                    name,
                    format_summary(machine),
                    format_transitions(machine)
                );
            }
        }
    }

    Ok(())
}

/// Loads the machine named on the command line, falling back to the built-in one.
///
/// A built-in machine name takes precedence over a file of the same name.
fn load_machine(program: Option<&str>) -> anyhow::Result<(String, TuringMachine)> {
    if let Some(name) = program {
        if ProgramManager::list_program_names()?.iter().any(|n| n == name) {
            let program = ProgramManager::get_program_by_name(name)?;
            return Ok((program.name, TuringMachine::from_definition(&program.definition)?));
        }
    }

    match program {
        Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            let definition = ProgramLoader::load_program_from_string(&buffer)?;
            Ok(("<stdin>".to_string(), TuringMachine::from_definition(&definition)?))
        }
        Some(path) => {
            let machine = ProgramLoader::load_machine(Path::new(path))
                .with_context(|| format!("Failed to load machine from '{}'", path))?;
            Ok((path.to_string(), machine))
        }
        None => Ok((
            BALANCED_ZEROS_ONES.to_string(),
            ProgramManager::balanced_zeros_ones()?,
        )),
    }
}

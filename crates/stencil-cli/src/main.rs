//! stencil CLI — stamp out project files from parameterized templates.
//!
//! Provides five commands: `process`, `render`, `check`, `vars`, and `conditions`.
//!
//! Each command builds a [`stencil_core::context::Context`] from the process
//! environment, optional JSON context files and `--set` overrides, then hands
//! it to a [`stencil_core::processor::TemplateProcessor`].

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stencil",
    about = "Generate project files from templates with {{VARIABLES}} and {{#IF_X}} blocks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Flat JSON object of context values, layered over the environment (repeatable)
    #[arg(long = "context", global = true, value_name = "FILE")]
    contexts: Vec<PathBuf>,

    /// Set a context value, overriding environment and files (repeatable)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    assignments: Vec<String>,

    /// Do not read context values from the process environment
    #[arg(long, global = true)]
    no_env: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a template file and write the result
    Process {
        /// Template to read
        input: PathBuf,

        /// File to write (parent directories are created)
        output: PathBuf,
    },

    /// Process a template file and print the result to stdout
    Render {
        /// Template to read
        input: PathBuf,
    },

    /// Check templates for malformed conditional blocks
    Check {
        /// Templates to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List resolved template variables
    Vars {
        /// Print as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// List registered conditions and whether they hold
    Conditions,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let context = commands::build_context(!cli.no_env, &cli.contexts, &cli.assignments)?;

    match cli.command {
        Commands::Process { input, output } => commands::process::run(&context, &input, &output),
        Commands::Render { input } => commands::render::run(&context, &input),
        Commands::Check { inputs } => commands::check::run(&context, &inputs),
        Commands::Vars { json } => commands::vars::run(&context, json),
        Commands::Conditions => commands::conditions::run(&context),
    }
}

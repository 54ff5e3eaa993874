mod check;
mod completions;
mod generate;

use std::path::Path;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate::GenerateCommand;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tsgen_codegen::GeneratorOptions;
use tsgen_ir::IntermediateRepresentation;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for tsgen_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "tsgen")]
#[command(version)]
#[command(about = "Generate TypeScript SDKs from an API definition")]
pub(crate) struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the SDK package
    Generate(GenerateCommand),

    /// Validate an IR document without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

fn load_ir(path: &Path) -> Result<IntermediateRepresentation> {
    IntermediateRepresentation::from_path(path).wrap_err("Failed to load IR")
}

/// Options from a config file, or defaults when none is given.
fn load_options(config: Option<&Path>) -> GeneratorOptions {
    match config {
        Some(path) => {
            GeneratorOptions::from_config(&tsgen_config::parse_file(path).unwrap_or_exit())
        }
        None => GeneratorOptions::default(),
    }
}

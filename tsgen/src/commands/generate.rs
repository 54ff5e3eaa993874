use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tsgen_config::CONFIG_FILE;

use super::{load_ir, load_options};
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the IR document
    #[arg(long)]
    pub ir: PathBuf,

    /// Path to tsgen.toml
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Output directory; its previous contents are replaced
    #[arg(short, long)]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let options = load_options(Some(&self.config));
        let ir = load_ir(&self.ir)?;

        let report = ops::generate(
            ir,
            options,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}

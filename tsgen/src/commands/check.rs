use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{load_ir, load_options};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the IR document
    #[arg(long)]
    pub ir: PathBuf,

    /// Path to tsgen.toml; defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let options = load_options(self.config.as_deref());
        let ir = load_ir(&self.ir)?;

        let report = ops::check(ir, options, &self.ir);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}

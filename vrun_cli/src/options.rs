use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::{Args, ValueEnum};
use vrun::{RunDef, RunDir};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Use colors
    #[arg(long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Never,
    Auto,
    Always,
}

impl Color {
    pub fn use_colors(&self) -> bool {
        match self {
            Self::Never => false,
            Self::Auto => io::stderr().is_terminal(),
            Self::Always => true,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Run directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub run_dir: Option<PathBuf>,
}

impl RunArgs {
    pub fn load(&self) -> anyhow::Result<(RunDir, RunDef)> {
        let run_dir = RunDir::resolve(self.run_dir.as_deref())?;
        let rundef = RunDef::load(&run_dir)?;

        Ok((run_dir, rundef))
    }
}

use clap::Subcommand;

use self::{env::EnvArgs, launch::LaunchArgs, show::ShowArgs};

mod env;
mod launch;
mod show;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the synthesis step of a run directory
    Launch(LaunchArgs),
    /// Print the search path the synthesis step runs with
    Env(EnvArgs),
    /// Print the run definition without running it
    Show(ShowArgs),
}

pub trait Run {
    fn run(&self) -> anyhow::Result<()>;
}

impl Commands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Launch(args) => args.run(),
            Self::Env(args) => args.run(),
            Self::Show(args) => args.run(),
        }
    }
}

use std::env;

use clap::Args;

use super::Run;
use crate::options::RunArgs;

#[derive(Debug, Args)]
pub struct EnvArgs {
    #[command(flatten)]
    run: RunArgs,
    /// Print as NAME=VALUE
    #[arg(long)]
    export: bool,
}

impl Run for EnvArgs {
    fn run(&self) -> anyhow::Result<()> {
        let (_, rundef) = self.run.load()?;
        let path_var = rundef.search_path();

        let current = env::var_os(path_var.name());
        let value = path_var.extend(current.as_deref())?;

        if self.export {
            println!("{}={}", path_var.name(), value.to_string_lossy());
        } else {
            println!("{}", value.to_string_lossy());
        }

        Ok(())
    }
}

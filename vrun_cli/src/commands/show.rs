use clap::Args;
use vrun::Host;

use super::Run;
use crate::options::RunArgs;

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    run: RunArgs,
    /// Print the run definition as json (the format of rundef.json)
    #[arg(long)]
    json: bool,
}

impl Run for ShowArgs {
    fn run(&self) -> anyhow::Result<()> {
        let (run_dir, rundef) = self.run.load()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rundef)?);
            return Ok(());
        }

        println!("run dir:   {}", run_dir.path().display());
        println!("host:      {} (current: {})", rundef.host, Host::current());
        println!("toolchain:");
        for dir in &rundef.toolchain {
            println!("    {}", dir.display());
        }
        println!("command:   {}", rundef.step.command_line());

        Ok(())
    }
}

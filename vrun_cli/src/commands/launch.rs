use std::process;

use clap::Args;
use tracing::{error, info};
use vrun::Step;

use super::Run;
use crate::options::RunArgs;

#[derive(Debug, Args)]
pub struct LaunchArgs {
    #[command(flatten)]
    run: RunArgs,
}

impl Run for LaunchArgs {
    fn run(&self) -> anyhow::Result<()> {
        let (run_dir, rundef) = self.run.load()?;

        rundef.check_host()?;
        rundef
            .search_path()
            .apply()
            .map_err(|e| anyhow::anyhow!("failed to set {}: {e}", rundef.path_var))?;

        let outcome = Step::new(&rundef.step, &run_dir).run()?;
        let code = outcome.exit_code();
        if outcome.success() {
            info!("{} finished", rundef.step.program);
        } else {
            error!("{} failed with exit code {code}", rundef.step.program);
        }

        process::exit(code)
    }
}

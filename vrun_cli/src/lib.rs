use std::io;

use clap::Parser;
use commands::Commands;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

mod commands;
mod options;
mod styles;

pub use options::{Color, LogArgs, RunArgs};

const LOG_ENV_VAR: &str = "VRUN_LOG";

#[derive(Parser)]
#[command(name = "vrun")]
#[command(version, about = "Runs a synthesis step of an FPGA project", long_about = None)]
#[command(styles = styles::get_styles())]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
    #[command(subcommand)]
    command: Commands,
}

fn init_logger(args: &LogArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();
    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(args.color.use_colors())
            .with_target(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set logger: {e}"))
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger(&cli.log)?;

    cli.command.run()
}

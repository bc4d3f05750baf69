fn main() -> anyhow::Result<()> {
    vrun_cli::run_cli()
}

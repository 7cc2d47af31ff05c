use anyhow::Result;
use gitlines::cli::Cli;
use gitlines::logging::setup_logger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbosity.tracing_level_filter());
    cli.execute()
}

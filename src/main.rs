use clap::Parser;
use tracing_subscriber::EnvFilter;

use pairing_engine::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("pairing_engine=debug,info")
    } else {
        EnvFilter::new("pairing_engine=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Pair(args) => {
            cli::pair::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Standings(args) => {
            cli::standings::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Simulate(args) => {
            cli::simulate::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}

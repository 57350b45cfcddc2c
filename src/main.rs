use clap::Parser;
use tracing_subscriber::EnvFilter;

use book_catalog::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("book_catalog=debug,info")
    } else {
        EnvFilter::new("book_catalog=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Shell(args) => {
            cli::shell::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}

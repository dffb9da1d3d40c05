//! Kira front end CLI entry point

use clap::Parser;

fn main() {
    let cli = kira::cli::Cli::parse();

    // Initialize structured logging with env-based filter; `--verbose` only changes the default
    let default_filter = cli.options.to_config().log_filter();
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();

    kira::cli::run(cli);
}

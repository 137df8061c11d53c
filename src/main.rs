// Passbox — Application entry point
//
// Parses CLI arguments, initializes structured logging, and dispatches to
// the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use passbox::cli::{execute, Cli};

#[tokio::main]
async fn main() {
    // RUST_LOG=passbox=debug for verbose output. The default level is
    // `info`; store events never include secret values.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passbox=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use std::process::ExitCode;

use clap::Parser;

use coderr_cli::{Cli, execute};

pub fn main() -> ExitCode {
    let args = Cli::parse();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    match execute(&args.command) {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            tracing::error!(error = %e, "execution failed");
            ExitCode::FAILURE
        }
    }
}

//! Relay - Entry Point
//!
//! Binary entry point for the `relay` command line tool.

use std::process::ExitCode;

use clap::Parser;
use relay::cli::{Cli, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

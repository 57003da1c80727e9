// This is the primary entry point for the sequencer CLI.
// The lib.rs file serves as the public API the binary and the tests build on.

use std::process::ExitCode;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use webp_sequencer_lib::Cli;

/// Exit code for arguments clap could not make sense of.
const USAGE_EXIT_CODE: u8 = 4;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()                // Use compact formatter instead of pretty
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT_CODE),
            };
        }
    };

    init_tracing(cli.default_log_level());
    debug!("Output directory: {}", cli.output.display());

    match webp_sequencer_lib::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

//! Command-line surface.
//!
//! `webp-sequencer <output> <command> ...` where the output directory comes
//! first and is shared by every command.

use std::path::PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use crate::commands::{self, AppendOptions, AppendSource, RebuildOptions};
use crate::core::AppState;
use crate::utils::{SequencerError, SequencerResult};

#[derive(Debug, Parser)]
#[command(name = "webp-sequencer")]
#[command(version, about = "Convert images into a contiguous, numbered WebP sequence", long_about = None)]
pub struct Cli {
    /// Output directory holding `<N>.webp`
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Regenerate the output set from a directory with random numbering
    Rebuild {
        /// Directory containing the source images
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Do not delete existing output directory files
        #[arg(short, long)]
        dirty: bool,

        #[command(flatten)]
        threads: ThreadArgs,
    },

    /// Add images after the current highest number
    Append {
        /// Image files to append
        #[arg(value_name = "IMAGES", required_unless_present = "input", conflicts_with = "input")]
        images: Vec<PathBuf>,

        /// Append every image found in this directory instead
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        #[command(flatten)]
        threads: ThreadArgs,
    },

    /// Delete numbered images and close the gaps
    Delete {
        /// Numbers to delete
        #[arg(value_name = "NUMBERS", required = true, value_parser = clap::value_parser!(u32).range(1..))]
        numbers: Vec<u32>,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct ThreadArgs {
    /// Number of threads to use (defaults to the CPU count)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Runs the parsed command to completion.
pub async fn run(cli: Cli) -> SequencerResult<()> {
    let Some(command) = cli.command else {
        return Err(SequencerError::missing_command("expected one of rebuild, append, delete"));
    };

    let state = AppState::default();
    let mut rng = rand::rng();

    match command {
        Command::Rebuild { input, dirty, threads } => {
            let options = RebuildOptions {
                output: cli.output,
                input,
                dirty,
                threads: threads.threads,
            };
            commands::rebuild(&state, &options, &mut rng).await?;
        }
        Command::Append { images, input, threads } => {
            let source = match input {
                Some(dir) => AppendSource::Directory(dir),
                None => AppendSource::Files(images),
            };
            let options = AppendOptions {
                output: cli.output,
                source,
                threads: threads.threads,
            };
            commands::append(&state, &options, &mut rng).await?;
        }
        Command::Delete { numbers } => {
            let summary = commands::delete(&cli.output, &numbers)?;
            info!(
                "Deleted {} of {} requested, {} files remain",
                summary.deleted.len(),
                summary.deleted.len() + summary.missing.len(),
                summary.remaining
            );
        }
    }

    Ok(())
}

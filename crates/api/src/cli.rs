//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Turn meeting notes into calendar tasks and events.
#[derive(Debug, Parser)]
#[command(name = "minutesync", version, about)]
pub struct Cli {
    /// Configuration file (JSON or TOML); skips environment lookup
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one notes file and print the result
    Analyze {
        /// Text file with the meeting notes
        file: PathBuf,

        /// Only analyze, do not create bookings
        #[arg(long)]
        no_sync: bool,
    },

    /// Process every pending `.txt` file in the input directory
    Run {
        /// Keep polling the input directory until Ctrl-C
        #[arg(long)]
        watch: bool,

        /// Only analyze, do not create bookings
        #[arg(long)]
        no_sync: bool,

        /// Polling interval in watch mode
        #[arg(long, default_value_t = 2, value_name = "SECS")]
        interval_secs: u64,
    },

    /// Check that the LLM and scheduling services answer
    Check,

    /// Serve the HTTP API
    Serve,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_to_two_second_polling() {
        let cli = Cli::parse_from(["minutesync", "run", "--watch"]);
        match cli.command {
            Command::Run { watch, no_sync, interval_secs } => {
                assert!(watch);
                assert!(!no_sync);
                assert_eq!(interval_secs, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn check_takes_no_arguments() {
        let cli = Cli::parse_from(["minutesync", "check"]);
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from([
            "minutesync",
            "analyze",
            "notes.txt",
            "--no-sync",
            "--config",
            "minutesync.toml",
            "--log-json",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("minutesync.toml")));
        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Analyze { no_sync: true, .. }));
    }
}

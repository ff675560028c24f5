//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::RangedU64ValueParser};
use tokengate_proto::constants::{AUTH_TABLE_CAPACITY, MAX_SCAN_LEN};

/// Tokengate host tooling.
#[derive(Debug, Parser)]
#[command(name = "tokengate-server", version, about)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decide on a single hex-encoded frame and print the verdict.
    Check {
        /// Table options
        #[command(flatten)]
        table: TableArgs,

        /// Scan options
        #[command(flatten)]
        scan: ScanArgs,

        /// Frame bytes as hex (whitespace allowed)
        #[arg(long)]
        frame: String,
    },

    /// Run every frame in a file through the filter and print counters.
    Replay {
        /// Table options
        #[command(flatten)]
        table: TableArgs,

        /// Scan options
        #[command(flatten)]
        scan: ScanArgs,

        /// File with one hex-encoded frame per line
        #[arg(long)]
        frames: PathBuf,

        /// Number of worker threads sharing the table
        #[arg(long, default_value_t = 1)]
        workers: usize,
    },
}

/// Authorization table options.
#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    /// File with one token per line (16 ASCII bytes or 32 hex characters)
    #[arg(long)]
    pub tokens: PathBuf,

    /// Maximum number of tokens (1 to 128)
    #[arg(
        long,
        default_value_t = AUTH_TABLE_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=AUTH_TABLE_CAPACITY as u64),
    )]
    pub capacity: usize,
}

/// Payload scan options.
#[derive(Debug, Clone, Copy, Args)]
pub struct ScanArgs {
    /// Payload bytes scanned for the Authorization prefix (at most 256)
    #[arg(long, default_value_t = MAX_SCAN_LEN)]
    pub max_scan_len: usize,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn replay_defaults() {
        let cli = Cli::parse_from([
            "tokengate-server",
            "replay",
            "--tokens",
            "tokens.txt",
            "--frames",
            "frames.txt",
        ]);

        let Command::Replay { table, scan, workers, .. } = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(table.capacity, 128);
        assert_eq!(scan.max_scan_len, 256);
        assert_eq!(workers, 1);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn capacity_outside_table_limits_is_rejected() {
        for capacity in ["0", "129", "18446744073709551615"] {
            let result = Cli::try_parse_from([
                "tokengate-server",
                "check",
                "--tokens",
                "tokens.txt",
                "--capacity",
                capacity,
                "--frame",
                "00",
            ]);
            let err = result.unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{capacity}");
        }
    }

    #[test]
    fn capacity_at_limit_is_accepted() {
        let cli = Cli::try_parse_from([
            "tokengate-server",
            "check",
            "--tokens",
            "tokens.txt",
            "--capacity",
            "128",
            "--frame",
            "00",
        ])
        .unwrap();
        let Command::Check { table, .. } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(table.capacity, 128);
    }
}

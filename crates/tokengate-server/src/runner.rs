//! Subcommand execution and logging setup.

use std::io::Write;

use tokengate_core::{Filter, FilterConfig, SharedTable};
use tokengate_proto::ScanConfig;
use tracing_subscriber::EnvFilter;

use crate::{
    Cli, Command, ServerError,
    cli::{ScanArgs, TableArgs},
    loader, replay,
};

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_tracing(level: &str) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ServerError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}

/// Run the selected subcommand, writing its report to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<(), ServerError> {
    match cli.command {
        Command::Check { table, scan, frame } => {
            let table = load_table(&table)?;
            let frame = loader::parse_frame(&frame).map_err(ServerError::FrameArg)?;
            let filter = Filter::with_config(&table, filter_config(scan));

            let verdict = filter.inspect(&frame);
            tracing::debug!(len = frame.len(), %verdict, "frame checked");
            writeln!(out, "{verdict}")?;
        },
        Command::Replay { table, scan, frames, workers } => {
            let table = load_table(&table)?;
            let frames = loader::load_frames(&frames)?;

            let stats = replay::replay(&frames, &table, filter_config(scan), workers);
            write!(out, "{stats}")?;
        },
    }
    Ok(())
}

fn load_table(args: &TableArgs) -> Result<SharedTable, ServerError> {
    loader::load_tokens(&args.tokens, args.capacity).map(SharedTable::new)
}

fn filter_config(args: ScanArgs) -> FilterConfig {
    let scan = ScanConfig::with_max_scan_len(args.max_scan_len);
    if scan.max_scan_len() != args.max_scan_len {
        tracing::warn!(
            requested = args.max_scan_len,
            effective = scan.max_scan_len(),
            "scan length clamped"
        );
    }
    FilterConfig { scan }
}

//! Tokengate host binary.
//!
//! ```text
//! tokengate-server check  --tokens tokens.txt --frame <hex>
//! tokengate-server replay --tokens tokens.txt --frames capture.txt [--workers N]
//! ```

use std::{io::Write, process::ExitCode};

use clap::Parser;
use tokengate_server::{Cli, init_tracing, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        let _ = writeln!(std::io::stderr(), "{e}");
        return ExitCode::FAILURE;
    }

    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "tokengate-server failed");
            ExitCode::FAILURE
        },
    }
}

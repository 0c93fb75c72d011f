//! Unitconv interactive shell
//!
//! Reads conversions from stdin, writes prompts and results to stdout.
//! Logs go to stderr.
//!
//! Environment:
//! - UNITCONV_PRECISION: decimals shown for results (default 4)
//! - UNITCONV_OUTPUT: "text" (default) or "json"
//! - RUST_LOG: log filter (default "warn")

mod config;
mod shell;

use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unitconv_units::ConversionEngine;

use crate::config::ShellConfig;
use crate::shell::Shell;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let config = match ShellConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("unitconv: {}", e);
            return ExitCode::from(2);
        }
    };

    let engine = match ConversionEngine::new() {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(code = e.code(), "engine construction failed");
            eprintln!("unitconv: {}", e.report());
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(version = VERSION, precision = config.precision, output = ?config.output, "unitconv started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&engine, config, stdin.lock(), stdout.lock());

    match shell.run() {
        Ok(converted) => {
            tracing::info!(converted, "session finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

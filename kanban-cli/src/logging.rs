//! Tracing subscriber setup

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Log to stderr so stdout carries only command output.
///
/// `RUST_LOG` wins over the flags when set.
pub fn configure_logging(debug: bool, quiet: bool) {
    let log_level = if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kanban_board={log_level},{log_level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

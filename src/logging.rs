use std::io::{self, IsTerminal};

use tracing::Level;

/// Routes diagnostics to stderr. Stdout carries nothing but record lines.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

//! Result output.

use serde::Serialize;

/// Print a command result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print version information.
pub fn print_version() {
    println!("lobster {}", env!("CARGO_PKG_VERSION"));
}

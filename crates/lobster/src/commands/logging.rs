//! Logging initialization.

use lobster_util::log::{self, LogConfig};

/// Initialize logging to stderr. `--verbose` enables debug output for the
/// lobster crates; `RUST_LOG` overrides both.
pub fn init_logging(verbose: bool) {
    let config = if verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    log::init(config);
}

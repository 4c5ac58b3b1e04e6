//! RAII-based timing utilities for measuring and logging operation durations.
//!
//! # Example
//!
//! ```rust,ignore
//! use lobster_util::timing::TimingGuard;
//!
//! async fn compare(key: &str) {
//!     let _timing = TimingGuard::new("state", key);
//!     // ... read, compare, write ...
//!     // Duration is logged when _timing is dropped
//! }
//! ```

use std::time::Instant;

const INFO_THRESHOLD_MS: u128 = 250;
const WARN_THRESHOLD_MS: u128 = 5000;
use tracing::{debug, info, warn};

/// RAII guard that logs the elapsed time of an operation when dropped.
pub struct TimingGuard {
    /// Kind of operation (e.g. "state", "command")
    operation_type: &'static str,
    /// Name of the specific operation (a key, a program name)
    operation_name: String,
    start: Instant,
}

impl TimingGuard {
    /// Create a new timing guard.
    pub fn new(operation_type: &'static str, operation_name: impl Into<String>) -> Self {
        let operation_name = operation_name.into();
        debug!(
            operation_type = operation_type,
            operation_name = %operation_name,
            "Starting operation"
        );
        Self {
            operation_type,
            operation_name,
            start: Instant::now(),
        }
    }

    /// Create a timing guard for an external command.
    pub fn command(program: impl Into<String>) -> Self {
        Self::new("command", program)
    }
}

fn format_duration(duration_ms: u128) -> String {
    if duration_ms < 1000 {
        format!("{duration_ms}ms")
    } else if duration_ms < 60_000 {
        format!("{:.2}s", duration_ms as f64 / 1000.0)
    } else {
        let mins = duration_ms / 60_000;
        let secs = (duration_ms % 60_000) as f64 / 1000.0;
        format!("{mins}m {secs:.1}s")
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis();
        let duration = format_duration(duration_ms);

        if duration_ms >= WARN_THRESHOLD_MS {
            warn!(
                operation_type = self.operation_type,
                operation_name = %self.operation_name,
                duration = %duration,
                "Slow operation completed"
            );
        } else if duration_ms >= INFO_THRESHOLD_MS {
            info!(
                operation_type = self.operation_type,
                operation_name = %self.operation_name,
                duration = %duration,
                "Operation completed"
            );
        } else {
            debug!(
                operation_type = self.operation_type,
                operation_name = %self.operation_name,
                duration = %duration,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12), "12ms");
        assert_eq!(format_duration(1500), "1.50s");
        assert_eq!(format_duration(61_000), "1m 1.0s");
    }
}

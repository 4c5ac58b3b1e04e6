//! Shared utilities for lobster.
//!
//! This crate provides common utilities used across the lobster workspace:
//! - Error handling patterns
//! - Logging setup with tracing
//! - Path conventions for the state directory
//! - RAII-based timing for operation measurement

pub mod error;
pub mod log;
pub mod path;
pub mod timing;

pub use error::{Error, Result};
pub use timing::TimingGuard;

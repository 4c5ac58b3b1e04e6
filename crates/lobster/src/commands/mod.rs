//! Command handlers for the lobster CLI.

pub mod diff;
pub mod logging;
pub mod output;
pub mod state;
pub mod workflows;

pub use diff::*;
pub use logging::*;
pub use output::*;
pub use state::*;
pub use workflows::*;

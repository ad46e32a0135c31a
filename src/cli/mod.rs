//! CLI commands
//!
//! Command implementations for the `ghsync` binary.

mod logging;
mod push;
mod style;
mod version;

pub use logging::init_logging;
pub use push::run_push;
pub use version::run_version;

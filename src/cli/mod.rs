//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod sources;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::*;
pub use sources::{SourcesArgs, handle_sources_command};
pub use version::display_version;

//! Subcommand implementations for the `corpact` binary.

pub mod build_cmd;
pub mod fetch_cmd;
pub mod output;
pub mod publish_cmd;
pub mod render_cmd;
pub mod run_cmd;

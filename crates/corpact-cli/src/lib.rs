//! Corpact command-line front end: configuration, subcommands, and publishing.

pub mod cli;
pub mod config;
pub mod publish;

pub use config::{resolve_fetch_config, DateWindow, FetchOverrides, PipelineConfig};
pub use publish::{GitPublisher, PublishError};

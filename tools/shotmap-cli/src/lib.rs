//! # Shotmap CLI
//!
//! Command-line front end over the flattening, storage and analytics crates.
//!
//! ## Commands
//!
//! - **flatten**: raw game records into a stored shot/goal table
//! - **visualize**: team vs league shot rates per rink cell
//! - **season**: season year of a game id

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::{failure_kind, Cli, CliHandler, Commands};
pub use config::{AnalyticsSettings, LoggingConfig, ShotmapConfig};
pub use logging::initialize_logging_with_config;
pub use output::{render, DifferentialRow, OutputFormat};

//! # Command Line Interface
//!
//! Flatten raw game records into the event store and build shot maps from it.

use crate::config::ShotmapConfig;
use crate::output::{render, OutputFormat};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use event_store::{
    load_or_compute, load_raw_records, validate_key, CachePolicy, CacheSource, CsvEventStore,
    EventStore, StoreError,
};
use play_flattener::flatten_with_summary;
use shot_analytics::{extract_year, visualization_table, AnalyticsError, VisualizationRequest};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Shot map CLI for NHL play-by-play data
#[derive(Parser)]
#[command(name = "shotmap")]
#[command(about = "Flatten NHL play-by-play records and compare team shot rates to the league")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Event store directory (overrides configuration)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Flatten raw game records and store the shot/goal table
    Flatten {
        /// Raw game records (JSON array, single object or JSON Lines)
        #[arg(short, long)]
        input: PathBuf,

        /// Store key; defaults to the input file stem
        #[arg(short, long)]
        key: Option<String>,

        /// Recompute even if a table is already stored under the key
        #[arg(long)]
        force: bool,
    },
    /// Print a team's shot rates against the league average
    Visualize {
        /// Store key of the event table
        #[arg(short, long)]
        key: String,

        /// Attacking team name, e.g. "Boston Bruins"
        #[arg(short, long)]
        team: String,

        /// Season start year, e.g. 2021
        #[arg(short, long)]
        year: i32,

        /// Bin width in feet (defaults to the configured bin size)
        #[arg(short, long)]
        bin_size: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Print the season year encoded in a game id
    Season {
        /// Game id, e.g. 2021020001
        game_id: String,
    },
}

impl Cli {
    /// Resolve configuration: file, environment, then command-line flags
    pub fn load_config(&self) -> Result<ShotmapConfig> {
        let mut config =
            ShotmapConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(data_dir) = &self.data_dir {
            config.store.data_dir = data_dir.clone();
        }

        Ok(config)
    }
}

/// CLI handler
pub struct CliHandler {
    config: ShotmapConfig,
}

impl CliHandler {
    /// Create new CLI handler
    pub fn new(config: ShotmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShotmapConfig {
        &self.config
    }

    /// Handle CLI commands, writing results to `out`
    pub fn handle_command<W: Write>(&self, command: Commands, out: &mut W) -> Result<()> {
        match command {
            Commands::Flatten { input, key, force } => {
                self.flatten(&input, key, force, out)?;
            }
            Commands::Visualize { key, team, year, bin_size, format } => {
                let bin_size = bin_size.unwrap_or(self.config.analytics.bin_size);
                let request = VisualizationRequest::new(team, year, bin_size);
                self.visualize(&key, &request, format, out)?;
            }
            Commands::Season { game_id } => {
                let year = extract_year(&game_id)?;
                writeln!(out, "{}", year)?;
            }
        }
        Ok(())
    }

    fn open_store(&self) -> Result<CsvEventStore> {
        CsvEventStore::new(self.config.store.clone()).with_context(|| {
            format!("Failed to open event store at {:?}", self.config.store.data_dir)
        })
    }

    /// Flatten `input` and store it, reusing an existing table unless `force`
    fn flatten<W: Write>(
        &self,
        input: &Path,
        key: Option<String>,
        force: bool,
        out: &mut W,
    ) -> Result<()> {
        let key = match key {
            Some(key) => key,
            None => default_key(input)?,
        };
        validate_key(&key)?;

        let mut store = self.open_store()?;
        let outcome = load_or_compute(&mut store, &key, CachePolicy::from_force_flag(force), || {
            let records = load_raw_records(input)?;
            let (events, summary) = flatten_with_summary(&records);
            tracing::debug!("Flatten summary: {:?}", summary);
            Ok(events)
        })
        .with_context(|| format!("Failed to flatten {:?}", input))?;

        let source = match outcome.source {
            CacheSource::Cached => "already stored, use --force to recompute",
            CacheSource::Computed => "flattened",
        };
        writeln!(out, "{} events under '{}' ({})", outcome.events.len(), key, source)?;

        Ok(())
    }

    fn visualize<W: Write>(
        &self,
        key: &str,
        request: &VisualizationRequest,
        format: OutputFormat,
        out: &mut W,
    ) -> Result<()> {
        let store = self.open_store()?;
        let events = store
            .load(key)
            .with_context(|| format!("Failed to load events stored under '{}'", key))?;

        let cells = visualization_table(&events, request)?;
        render(&cells, format, out)?;

        Ok(())
    }
}

/// Store key derived from the input file name, `2021.json` -> `2021`
pub fn default_key(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a store key from {:?}; pass --key", input))
}

/// Short label telling the failure categories apart
pub fn failure_kind(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(analytics) = cause.downcast_ref::<AnalyticsError>() {
            return match analytics {
                AnalyticsError::NoData { .. } => "no data",
                AnalyticsError::InvalidGameId(_) | AnalyticsError::MissingGameId => {
                    "malformed game id"
                }
                AnalyticsError::UndefinedRate { .. } => "undefined rate",
                AnalyticsError::InvalidBinSize(_) => "invalid bin size",
            };
        }
        if let Some(store) = cause.downcast_ref::<StoreError>() {
            return match store {
                StoreError::NotFound(_) => "not found",
                StoreError::InvalidKey(_) => "invalid key",
                _ => "storage error",
            };
        }
    }
    "error"
}

//! Command-line arguments and configuration loading.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use page_core::{EditGranularity, EditorConfig};

/// Delay before a simulated generation request completes.
pub const DEFAULT_GENERATION_DELAY_MS: u64 = 500;

/// Command-line arguments for page-builder.
#[derive(Debug, Clone, Parser)]
#[command(name = "page-builder")]
#[command(about = "Drag-and-drop page builder editing session")]
#[command(version)]
pub struct CliArgs {
    /// JSON file with editor configuration
    #[arg(long, env = "PAGE_BUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum entries on each history stack
    #[arg(long, env = "PAGE_BUILDER_HISTORY_CAPACITY")]
    pub history_capacity: Option<usize>,

    /// Record one history entry per committed edit group instead of per field
    #[arg(long, env = "PAGE_BUILDER_COALESCE_EDITS")]
    pub coalesce_edits: bool,

    /// Milliseconds a simulated generation request takes to complete
    #[arg(long, env = "PAGE_BUILDER_GENERATION_DELAY_MS", default_value_t = DEFAULT_GENERATION_DELAY_MS)]
    pub generation_delay_ms: u64,

    /// Print the document as JSON after every change
    #[arg(long)]
    pub json: bool,
}

/// Host settings that live outside the core configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSettings {
    /// Latency of simulated generation.
    pub generation_delay: Duration,
    /// Render documents as JSON.
    pub json: bool,
}

impl From<&CliArgs> for HostSettings {
    fn from(args: &CliArgs) -> Self {
        Self {
            generation_delay: Duration::from_millis(args.generation_delay_ms),
            json: args.json,
        }
    }
}

impl CliArgs {
    /// Build the editor configuration.
    ///
    /// Starts from the defaults, overlays the `--config` file if given, then
    /// the individual flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or the
    /// result fails validation.
    pub fn editor_config(&self) -> anyhow::Result<EditorConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                EditorConfig::from_json(&json)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => EditorConfig::default(),
        };

        if let Some(capacity) = self.history_capacity {
            config.history_capacity = capacity;
        }
        if self.coalesce_edits {
            config.edit_granularity = EditGranularity::PerCommit;
        }

        config.validate()?;
        Ok(config)
    }
}

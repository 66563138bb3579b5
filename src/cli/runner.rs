//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::StreamConfig;
use crate::engine::{Message, SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::source::FileSource;
use crate::state::StateManager;
use crate::types::LogLevel;
use chrono::Utc;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Plan { source, stream } => self.plan(source, stream.as_deref()).await,
            Commands::Sync {
                source,
                stream,
                checkpoint_interval,
                max_files,
            } => {
                let config = SyncConfig::new()
                    .with_checkpoint_interval(*checkpoint_interval)
                    .with_max_files(*max_files);
                self.sync(source, stream.as_deref(), config).await
            }
            Commands::State { stream } => self.show_state(stream.as_deref()).await,
        }
    }

    /// Load stream configuration
    ///
    /// Inline JSON takes precedence over the config file; without either the
    /// defaults are used.
    fn load_config(&self, stream_override: Option<&str>) -> Result<StreamConfig> {
        let mut config = if let Some(inline) = &self.cli.config_json {
            StreamConfig::parse(inline)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
        } else if let Some(path) = &self.cli.config {
            StreamConfig::from_file(path)?
        } else {
            StreamConfig::default()
        };

        if let Some(name) = stream_override {
            config.name = name.to_string();
            config.validate()?;
        }
        Ok(config)
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    /// Show which files would be synced
    async fn plan(&self, source: &str, stream: Option<&str>) -> Result<()> {
        let config = SyncConfig::new().with_dry_run(true);
        self.sync(source, stream, config).await
    }

    /// Sync a stream from a source
    async fn sync(&self, source: &str, stream: Option<&str>, config: SyncConfig) -> Result<()> {
        let stream_config = self.load_config(stream)?;
        let state = self.load_state()?;
        let source = FileSource::parse(source)?;

        let mut engine = SyncEngine::new(source, state).with_config(config);
        let messages = engine.sync_stream(&stream_config, Utc::now()).await?;
        for msg in &messages {
            self.output_engine_message(msg);
        }

        let stats = engine.stats();
        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Sync summary for {}: {} listed, {} synced, {} skipped, {} evicted from history",
                    stream_config.name,
                    stats.files_listed,
                    stats.files_synced,
                    stats.files_skipped(),
                    stats.files_evicted
                )
            }
        }));
        Ok(())
    }

    /// Print the persisted state of a stream
    async fn show_state(&self, stream: Option<&str>) -> Result<()> {
        let stream_config = self.load_config(stream)?;
        let state = self.load_state()?;
        let cursor_state = state.stream_state(&stream_config.name).await;
        self.output_engine_message(&Message::state(&stream_config.name, cursor_state));
        Ok(())
    }

    /// Output an engine message, hiding debug logs unless verbose
    fn output_engine_message(&self, msg: &Message) {
        if let Message::Log {
            level: LogLevel::Debug,
            ..
        } = msg
        {
            if !self.cli.verbose {
                return;
            }
        }
        self.output_message(&msg.to_json());
    }

    /// Output a JSON message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

//! CLI runner - executes commands

use crate::catalog::Catalog;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::TapConfig;
use crate::engine::SyncEngine;
use crate::error::Result;
use crate::output::{JsonLinesSink, Message};
use crate::session::SessionClient;
use crate::state::StateManager;
use serde::Serialize;
use std::path::Path;
use tracing::info;

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
            Commands::Check => self.check().await,
            Commands::Discover => self.discover(),
            Commands::Read { catalog } => self.read(catalog.as_deref()).await,
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return TapConfig::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Ok(TapConfig::default())
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

    /// Check connection
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate_connection()?;

        match SessionClient::connect(config.http_client_config(), config.credentials()?).await {
            Ok(client) => {
                let limit = client.rate_limit();
                let message = if limit.enabled {
                    format!(
                        "Connection successful, limited to {} requests per minute",
                        limit.max_requests
                    )
                } else {
                    "Connection successful".to_string()
                };
                self.output_message(&Message::connection_succeeded(message));
            }
            Err(e) => {
                self.output_message(&Message::connection_failed(format!(
                    "Connection failed: {e}"
                )));
            }
        }

        Ok(())
    }

    /// Discover streams
    fn discover(&self) -> Result<()> {
        self.output_message(&Catalog::discover());
        Ok(())
    }

    /// Read the selected streams
    async fn read(&self, catalog: Option<&Path>) -> Result<()> {
        let config = self.load_config()?;
        let state = self.load_state()?;
        if !state.is_in_memory() {
            info!("Checkpointing state to {}", state.path().display());
        }
        let catalog = match catalog {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::discover(),
        };

        let mut sink = JsonLinesSink::stdout(self.cli.format == OutputFormat::Pretty);
        let mut engine = SyncEngine::new(config);
        let stats = engine.run(&catalog, &state, &mut sink).await?;

        info!(
            "Read finished: {} records, {} days, {} streams",
            stats.records_synced, stats.days_synced, stats.streams_synced
        );
        Ok(())
    }

    /// Output a message
    fn output_message<T: Serialize>(&self, msg: &T) {
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

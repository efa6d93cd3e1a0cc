use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::tui;

/// Folio - overlay dialogs and anchored pickers for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Overlay dialogs and anchored pickers for the terminal",
    long_about = r#"Folio runs a small skills editor that exercises the overlay framework:
a tabbed admin dialog with search, breadcrumbs and floating actions, and
pickers whose suggestion panels float above every clipping container.

Examples:
  folio                            # Start the editor
  folio --config ./folio.json      # Use an explicit configuration file
  folio config                     # Print the resolved configuration"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Configuration file to load instead of the default locations
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved configuration as JSON
    Config,
}

impl Cli {
    /// Whether this invocation takes over the terminal
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// Run the selected command against an already resolved configuration
    pub async fn execute(self, config: Config) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }
        debug!("Configuration data dir: {}", config.data_dir.display());

        match self.command {
            Some(Commands::Config) => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            None => {
                info!("Starting interactive mode");
                tui::run(&config).await?;
                info!("Application finished");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(!cli.debug);
        assert!(cli.config.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["folio", "config", "--config", "x.json", "-d"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("x.json")));
        assert!(cli.debug);
        assert!(!cli.is_interactive());
    }
}

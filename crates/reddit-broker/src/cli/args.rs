use super::handlers;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{OffLevel, Verbosity};
use std::path::PathBuf;

/// Reddit identity broker - inspect settings and resolve identities
#[derive(Parser, Debug)]
#[command(
    name = "reddit-broker",
    version,
    about = "Reddit identity broker - inspect settings and resolve identities",
    long_about = "Operator tool for the Reddit identity broker provider.

EXAMPLES:
  reddit-broker identity --token <ACCESS_TOKEN>   # Resolve the identity behind a token
  reddit-broker scopes                            # Scopes the authorization request needs
  reddit-broker describe                          # Provider metadata as JSON
  reddit-broker example-config > reddit-broker.toml"
)]
pub struct Args {
    /// Configuration file path (defaults to ./reddit-broker.toml when present)
    #[arg(short, long, global = true, env = "REDDIT_BROKER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<OffLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the profile for an access token and print the resulting identity as JSON
    Identity {
        /// Bearer access token obtained from Reddit's OAuth2 flow
        #[arg(long, env = "REDDIT_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Print the scopes the authorization request must ask for
    Scopes,

    /// Print provider metadata and configuration properties as JSON
    Describe,

    /// Print an example configuration file
    ExampleConfig,
}

impl Args {
    /// Execute the CLI command
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = self.config.as_deref();

        match self.command {
            Commands::Identity { token } => handlers::handle_identity(config_path, &token).await,
            Commands::Scopes => handlers::handle_scopes(config_path),
            Commands::Describe => handlers::handle_describe(),
            Commands::ExampleConfig => handlers::handle_example_config(),
        }
    }
}

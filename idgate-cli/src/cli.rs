use clap::{Parser, Subcommand};
use idgate_telemetry::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "idgate")]
#[command(version, about = "Resolve a verified email from an OAuth access token", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "IDGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log line format: pretty or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check membership constraints and print the user's primary email
    Resolve {
        /// OAuth access token
        #[arg(long, env = "IDGATE_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Ask the provider whether an access token is still accepted
    Validate {
        /// OAuth access token
        #[arg(long, env = "IDGATE_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Print the authorization URL to send a user to
    LoginUrl {
        /// Callback URL registered with the provider
        #[arg(long)]
        redirect_uri: String,

        /// Opaque state echoed back on the callback
        #[arg(long, default_value = "")]
        state: String,
    },

    /// Print the effective provider configuration
    ShowConfig,
}

mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use idgate_auth::{GitHubProvider, Provider, Session};
use idgate_telemetry::{info, init_telemetry, warn};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?.with_env();
    init_telemetry("idgate", cli.log_format.unwrap_or(config.logging.format))
        .map_err(|e| anyhow::anyhow!(e))?;

    let provider = config.build_provider()?;

    match cli.command {
        Commands::Resolve { token } => resolve(&provider, Session::new(token)).await,
        Commands::Validate { token } => validate(&provider, Session::new(token)).await,
        Commands::LoginUrl { redirect_uri, state } => {
            println!("{}", provider.config().login_url(&redirect_uri, &state));
            Ok(ExitCode::SUCCESS)
        }
        Commands::ShowConfig => {
            show_config(&provider);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Details of a failure go to the log; the user only sees the outcome.
async fn resolve(provider: &GitHubProvider, session: Session) -> Result<ExitCode> {
    match provider.resolve_verified_email(&session).await {
        Ok(email) => {
            info!(provider = provider.name(), "resolved verified email");
            println!("{email}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            warn!(provider = provider.name(), denied = err.is_denial(), error = %err, "resolution failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn validate(provider: &GitHubProvider, session: Session) -> Result<ExitCode> {
    match provider.validate_session(&session).await {
        Ok(valid) => {
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Err(err) => {
            warn!(provider = provider.name(), error = %err, "token validation failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn show_config(provider: &GitHubProvider) {
    let config = provider.config();
    println!("provider      = {}", config.name());
    println!("client_id     = {}", config.client_id());
    println!("authorize_url = {}", config.authorize_url());
    println!("token_url     = {}", config.token_url());
    println!("profile_url   = {}", config.profile_url());
    println!("validate_url  = {}", config.validate_url());
    println!("scope         = {}", config.scope());
    println!("org           = {}", provider.org());
    println!("team          = {}", provider.team());
}

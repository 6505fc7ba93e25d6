//! Dhraviq - terminal client for multi-agent goal coaching
//!
#![doc = "Dhraviq - terminal client for multi-agent goal coaching"]
#![doc = "Main entry point for the dhraviq binary."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dhraviq::cli::{Cli, Commands};
use dhraviq::commands;
use dhraviq::config::{Config, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Initialize tracing once the output format is known
    init_tracing(&config.logging, cli.verbose);

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { agents, reminders } => {
            commands::chat::run_chat(config, agents, reminders).await?;
            Ok(())
        }
        Commands::Ask {
            question,
            agents,
            reminders,
            save,
        } => {
            tracing::debug!("Asking a single question");
            commands::chat::ask(config, question, agents, reminders, save).await?;
            Ok(())
        }
        Commands::Login {
            uid,
            email,
            name,
            token,
            expires_in,
        } => {
            commands::auth::login(config, uid, email, name, token, expires_in).await?;
            Ok(())
        }
        Commands::Logout => {
            commands::auth::logout().await?;
            Ok(())
        }
        Commands::Whoami => {
            commands::auth::whoami().await?;
            Ok(())
        }
        Commands::Agents { json } => {
            commands::agents::list_agents(json)?;
            Ok(())
        }
        Commands::Progress { json } => {
            commands::progress::show_progress(&config, json).await?;
            Ok(())
        }
        Commands::Health => {
            commands::health::check(&config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `dhraviq=info`, or `dhraviq=debug` with
/// `--verbose`.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { "dhraviq=debug" } else { "dhraviq=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

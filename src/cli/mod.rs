//! CLI module for the user service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `migrate`: apply PostgreSQL schema migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// User service - validated user mutations with change events
#[derive(Parser)]
#[command(name = "user-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply pending database migrations
    Migrate,
}

/// Load `.env`, configuration and logging shared by every subcommand
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });
    logging::init_logging(&config.logging);

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["user-service", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate() {
        let cli = Cli::try_parse_from(["user-service", "migrate"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["user-service"]).is_err());
    }
}

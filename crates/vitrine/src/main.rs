//! # Vitrine CLI
//!
//! The command-line interface for the Vitrine catalog service.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version)]
#[command(about = "Read-only product catalog service with a JSON HTTP API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the catalog server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Database URL (e.g. sqlite:vitrine.db)
        #[arg(short, long)]
        database_url: Option<String>,
    },

    /// Print the catalog contents
    Products {
        /// Database URL
        #[arg(short, long)]
        database_url: Option<String>,
    },

    /// Manage the database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Display version and build info
    Version,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create the schema
    Migrate {
        /// Database URL
        #[arg(short, long)]
        database_url: Option<String>,
    },

    /// Insert demo products
    Seed {
        /// Database URL
        #[arg(short, long)]
        database_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set default database URL
    SetDatabaseUrl {
        /// Database URL (e.g. sqlite:vitrine.db)
        url: String,
    },

    /// Clear default database URL
    ClearDatabaseUrl,

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize logging
    let telemetry_config = vitrine_telemetry::TelemetryConfig::new("vitrine")
        .with_log_level(&cli.log_level);

    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };

    vitrine_telemetry::init_logging(&telemetry_config);

    // Load configuration for default values
    let cfg = config::Config::load();

    match cli.command {
        Commands::Serve {
            host,
            port,
            database_url,
        } => {
            let host = host.unwrap_or_else(|| cfg.server_host.clone());
            let port = port.unwrap_or(cfg.server_port);
            let database_url = database_url.unwrap_or_else(|| cfg.database_url());
            commands::serve(host, port, database_url).await?;
        }

        Commands::Products { database_url } => {
            let database_url = database_url.unwrap_or_else(|| cfg.database_url());
            commands::products(database_url).await?;
        }

        Commands::Db { action } => match action {
            DbAction::Migrate { database_url } => {
                let database_url = database_url.unwrap_or_else(|| cfg.database_url());
                commands::db_migrate(database_url).await?;
            }
            DbAction::Seed { database_url } => {
                let database_url = database_url.unwrap_or_else(|| cfg.database_url());
                commands::db_seed(database_url).await?;
            }
        },

        Commands::Version => {
            commands::version();
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config();
            }
            ConfigAction::SetDatabaseUrl { url } => {
                let mut cfg = config::Config::load();
                match cfg.set_database_url(&url) {
                    Ok(()) => {
                        println!("Default database URL set to: {}", url);
                        println!("Config saved to: {}", config::Config::config_path().display());
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    }
                }
            }
            ConfigAction::ClearDatabaseUrl => {
                let mut cfg = config::Config::load();
                match cfg.clear_database_url() {
                    Ok(()) => {
                        println!("Default database URL cleared.");
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    }
                }
            }
            ConfigAction::Path => {
                println!("{}", config::Config::config_path().display());
            }
        },
    }

    Ok(())
}

//! `plantdesk` — back-office CLI for the plant floor API.
//!
//! Manages workers, machines, stock items, and production orders
//! through the in-memory entity cache: collections load once per
//! invocation and mutations write through only after the server
//! confirms them.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use plantdesk_core::EntityId;

/// plantdesk CLI tool.
#[derive(Parser, Debug)]
#[command(name = "plantdesk", about = "Plant back-office client")]
struct Cli {
    /// Path to client config file (default: ~/.plantdesk/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage server contexts.
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// List a resource collection.
    Get {
        /// Resource type (workers, machines, stock-items, orders).
        resource: String,
        /// Output raw JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Create a record.
    Create {
        /// Resource type.
        resource: String,
        /// JSON payload.
        #[arg(long = "data")]
        data: Option<String>,
        /// Read JSON payload from file.
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,
    },

    /// Update a record.
    Update {
        /// Resource type.
        resource: String,
        /// Record id.
        id: EntityId,
        /// JSON payload.
        #[arg(long = "data")]
        data: String,
    },

    /// Delete a record.
    Delete {
        /// Resource type.
        resource: String,
        /// Record id.
        id: EntityId,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Set a production order's status.
    SetStatus {
        /// Order id.
        id: EntityId,
        /// New status (PENDING, IN_PROGRESS, COMPLETED).
        status: String,
    },

    /// Dashboard overview counts.
    Stats,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Set properties on a context, creating it if needed.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
    /// List all contexts.
    List,
    /// Switch the current context.
    Use { name: String },
    /// Delete a context.
    Delete { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(config::ClientConfig::default_path);

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Set { name, server, token } => {
                commands::context::set(&name, server.as_deref(), token.as_deref(), &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Use { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Get { resource, json } => {
            let cache = commands::build_cache(&config_path)?;
            commands::resource::get(&cache, &resource, json).await?;
        }

        Commands::Create { resource, data, file } => {
            let body = if let Some(path) = file {
                std::fs::read_to_string(&path)?
            } else if let Some(data) = data {
                data
            } else {
                anyhow::bail!("Provide --data or -f <file>.");
            };
            let cache = commands::build_cache(&config_path)?;
            commands::resource::create(&cache, &resource, &body).await?;
        }

        Commands::Update { resource, id, data } => {
            let cache = commands::build_cache(&config_path)?;
            commands::resource::update(&cache, &resource, id, &data).await?;
        }

        Commands::Delete { resource, id, yes } => {
            if !yes {
                eprint!("Are you sure? [y/N]: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let cache = commands::build_cache(&config_path)?;
            commands::resource::delete(&cache, &resource, id).await?;
        }

        Commands::SetStatus { id, status } => {
            let cache = commands::build_cache(&config_path)?;
            commands::resource::set_status(&cache, id, &status).await?;
        }

        Commands::Stats => {
            let cache = commands::build_cache(&config_path)?;
            commands::stats::run(&cache).await?;
        }

        Commands::Version => {
            println!("plantdesk cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

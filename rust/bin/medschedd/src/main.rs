//! `medschedd`: the medical scheduling server binary.
//!
//! Usage:
//!   medschedd serve -c <context-name-or-path> [--listen <addr>]
//!   medschedd token -c <context> --sub <id> --name <name> --user-type <type> [--facility <id>]
//!
//! The context name resolves to `/etc/medsched/<name>.toml`.
//! If a path with `/` or ending in `.toml` is given, it's used directly.

mod bootstrap;
mod config;
mod pages;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use medsched_core::{Actor, Authenticator, Module, UserType};
use tracing::info;

use config::ServerConfig;

/// Medical scheduling server.
#[derive(Parser, Debug)]
#[command(name = "medschedd", about = "Medical scheduling server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Context name or path to config file.
        #[arg(short = 'c', long = "config", required = true)]
        config: String,

        /// Listen address.
        #[arg(long = "listen", default_value = "0.0.0.0:8080")]
        listen: String,
    },

    /// Issue a signed access token for the given context.
    Token {
        #[arg(short = 'c', long = "config", required = true)]
        config: String,

        /// Account id (token subject).
        #[arg(long)]
        sub: String,

        /// Display name.
        #[arg(long)]
        name: String,

        /// One of: patient, facility, doctor, admin.
        #[arg(long = "user-type")]
        user_type: UserType,

        /// Facility the account acts for.
        #[arg(long)]
        facility: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve { config, listen } => serve(&config, listen).await,
        Commands::Token {
            config,
            sub,
            name,
            user_type,
            facility,
        } => {
            let server_config = load_config(&config)?;
            let jwt = auth::JwtService::new(&server_config.jwt.secret, server_config.jwt.expire_secs);
            let token = jwt.issue(&Actor {
                id: sub,
                name,
                user_type,
                facility_id: facility,
            })?;
            println!("{}", token);
            Ok(())
        }
    }
}

fn load_config(context: &str) -> anyhow::Result<ServerConfig> {
    let config_path = ServerConfig::resolve_path(context);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;
    Ok(server_config)
}

async fn serve(context: &str, listen: String) -> anyhow::Result<()> {
    let server_config = load_config(context)?;

    // Initialize storage.
    let data_dir = PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = medsched_core::ServiceConfig {
        data_dir: Some(data_dir),
        listen,
        ..Default::default()
    };

    let store = Arc::new(
        availability::AvailabilityStore::open(&core_config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open store: {}", e))?,
    );

    let availability_module = availability::AvailabilityModule::new(store);
    if let Some(summary) = bootstrap::import_seed(&server_config, availability_module.service())? {
        info!(
            "Seed imported: {} doctors, {} rules, {} slots",
            summary.doctors, summary.rules, summary.slots
        );
    }
    info!("{} module initialized", availability_module.name());

    let table = routes::build_table(availability_module.routes())?;
    for binding in table.bindings() {
        info!("  {} {} [{}] {:?}", binding.method, binding.path, binding.name, binding.gate);
    }

    let authenticator: Arc<dyn Authenticator> = Arc::new(auth::JwtService::new(
        &server_config.jwt.secret,
        server_config.jwt.expire_secs,
    ));
    let app = routes::build_router(table, authenticator);

    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("medschedd listening on {}", core_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}

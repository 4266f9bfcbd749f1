use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use gusen_config::{ConfigLoad, ConfigLoader};
use gusen_core::{
    auth::{SigningKey, hasher_for},
    database::postgres::{
        self, PostgresCityStore, PostgresClientStore, PostgresLogStore, PostgresUserStore,
    },
};
use gusen_server::{AppState, build_app};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "gusen-server")]
#[command(about = "Admin backend for the Gusen back office")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a .env file loaded before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Bind host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored digest of a secret under the configured scheme
    Digest {
        /// Password or PIN to digest
        secret: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ConfigLoad {
        mut config,
        warnings,
    } = load_config(&cli.serve)?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "loaded configuration file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }

    let hasher = hasher_for(config.auth.credential_scheme)
        .context("failed to initialise credential hasher")?;

    if let Some(Command::Digest { secret }) = cli.command {
        let digest = hasher
            .digest(&secret)
            .context("failed to digest secret")?;
        println!("{digest}");
        return Ok(());
    }

    if let Some(port) = cli.serve.port {
        config.server.port = port;
    }
    if let Some(host) = cli.serve.host.clone() {
        config.server.host = host;
    }

    let signing_key = match config.auth.signing_key.as_deref() {
        Some(secret) => SigningKey::from_secret(secret)
            .context("invalid AUTH_SIGNING_KEY")?,
        None => {
            warn!(
                "generated an ephemeral signing key; sessions will not survive a restart"
            );
            SigningKey::generate().context("failed to generate signing key")?
        }
    };

    let Some(database_url) = config.database.url.clone() else {
        bail!("no database configured; set DATABASE_URL");
    };
    let pool = postgres::connect(&database_url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!(
        max_connections = config.database.max_connections,
        "database pool ready"
    );

    let bind_address = config.server.bind_address();
    let state = AppState::new(
        config,
        Arc::new(PostgresUserStore::new(pool.clone())),
        Arc::new(PostgresLogStore::new(pool.clone())),
        Arc::new(PostgresClientStore::new(pool.clone())),
        Arc::new(PostgresCityStore::new(pool)),
        hasher,
        &signing_key,
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(address = %bind_address, "admin backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("admin backend stopped");
    Ok(())
}

fn load_config(args: &ServeArgs) -> anyhow::Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = args.env_file.clone() {
        loader = loader.with_env_file(path);
    }
    loader.load().context("failed to load configuration")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use domain::Site;
use domain::staff::User;
use infrastructure::{ServerConfig, SeaOrmCaptainRepository, SeaOrmUserRepository};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use station_server::{AppState, Repositories, api};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and the RUN_MODE overrides
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API port, overrides http.port from the configuration
    #[arg(long)]
    port: Option<u16>,

    /// Apply pending schema migrations before serving
    #[arg(long)]
    migrate: bool,

    /// Re-derive stored fuel and shop performance from current targets, then exit
    #[arg(long)]
    recompute_performance: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a login identity, then exit
    CreateUser {
        username: String,
        password: String,
        #[arg(long)]
        manager: bool,
        #[arg(long)]
        supervisor: bool,
        /// Also designate the user captain of this site
        #[arg(long)]
        captain_of: Option<Site>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,station_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();
    let args = Args::parse();
    info!("⛽ Station Server Starting...");

    let config = ServerConfig::load(&args.config_dir).context("loading configuration")?;

    info!("Connecting to database...");
    let db = infrastructure::database::connect(&config.database.url, config.database.max_connections)
        .await
        .context("connecting to database")?;

    if args.migrate {
        info!("Running database migrations...");
        Migrator::up(&db, None).await?;
        info!("✅ Migrations applied successfully");
    }

    if let Some(Command::CreateUser {
        username,
        password,
        manager,
        supervisor,
        captain_of,
    }) = args.command
    {
        let password_hash = infrastructure::auth::hash_password(&password)
            .map_err(|e| anyhow::anyhow!("hashing password: {}", e))?;
        let user = SeaOrmUserRepository::new(db.clone())
            .create(&User {
                id: 0,
                username,
                password_hash,
                is_captain: captain_of.is_some(),
                is_manager: manager,
                is_supervisor: supervisor,
                is_no_role: !(manager || supervisor || captain_of.is_some()),
            })
            .await?;
        if let Some(site) = captain_of {
            SeaOrmCaptainRepository::new(db.clone())
                .create(user.id, site)
                .await?;
        }
        info!(id = user.id, username = %user.username, "✅ User created");
        return Ok(());
    }

    let state = AppState::new(Repositories::postgres(db), config.summary.clone());

    if args.recompute_performance {
        let fuel = state.sales.recompute_fuel_performance().await?;
        let shop = state.sales.recompute_shop_performance().await?;
        info!(fuel, shop, "✅ Performance recomputed");
        return Ok(());
    }

    let app = api::create_router(Arc::new(state));
    let port = args.port.unwrap_or(config.http.port);
    let addr = format!("{}:{}", config.http.host, port);
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

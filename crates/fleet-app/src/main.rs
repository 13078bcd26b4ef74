use clap::{Parser, Subcommand};
use salvo::Listener;
use salvo::conn::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use fleet_app::app::router;
use fleet_core::config::{Settings, load_config};
use fleet_db::db::{
    DbProvider,
    connection::{DbPool, create_pool},
    migrate::run_migrations,
};
use fleet_service::fleet::driver::create_superuser;

#[derive(Debug, Parser)]
#[command(name = "fleet", about = "Taxi fleet management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply migrations and serve HTTP (the default).
    Serve,
    /// Apply pending migrations and exit.
    Migrate,
    /// Create a staff account with every permission.
    CreateSuperuser {
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, env = "FLEET_SUPERUSER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    run_migrations(&config.database.url).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Migrate => Ok(()),
        Command::CreateSuperuser {
            username,
            email,
            password,
        } => {
            let pool = connect(&config).await?;
            let mut conn = pool.get_connection().await?;
            let driver = create_superuser(&mut conn, &username, &email, &password).await?;
            tracing::info!(driver_id = %driver.id, username = %driver.username, "Superuser created");
            Ok(())
        }
    }
}

async fn connect(config: &Settings) -> anyhow::Result<DbPool> {
    create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await
}

async fn serve(config: Settings) -> anyhow::Result<()> {
    tracing::info!("Starting fleet server");

    let pool = connect(&config).await?;

    tracing::info!("Database connection pool created.");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = router(pool, config);

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}

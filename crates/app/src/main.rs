use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biodex_app::auth::jwt::JwtConfig;
use biodex_app::cli::{self, App, Cli, Command};
use biodex_app::config::AppConfig;
use biodex_app::host::ConsoleHost;
use biodex_app::session::TokenSessionProvider;
use biodex_db::PgRecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biodex_app=debug,biodex_db=debug,biodex_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Minting a token needs only the signing secret.
    if let Command::Token { user_id, email } = &cli.command {
        let jwt = JwtConfig::from_env();
        println!("{}", cli::mint_token(*user_id, email.as_deref(), &jwt)?);
        return Ok(());
    }

    // --- Configuration ---
    let config = AppConfig::from_env();
    tracing::info!(
        max_connections = config.max_connections,
        name_rule = ?config.name_rule,
        signed_in = config.access_token.is_some() || cli.token.is_some(),
        "Loaded configuration"
    );

    // --- Database ---
    let pool = biodex_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    biodex_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    biodex_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database ready");

    // --- Collaborators ---
    let store = PgRecordStore::new(pool);
    let sessions = TokenSessionProvider::new(cli.token.or(config.access_token), config.jwt.clone());
    let host = ConsoleHost::new();
    let app = App {
        store: &store,
        sessions: &sessions,
        host: &host,
        name_rule: config.name_rule,
        jwt: &config.jwt,
    };

    match cli::run(cli.command, &app).await {
        Ok(output) => {
            println!("{output}");
            if host.refresh_count() > 0 {
                tracing::debug!("View refreshed after save");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("error [{}]: {}", err.code(), err.public_message());
            std::process::exit(1);
        }
    }
}

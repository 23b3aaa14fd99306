use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use concierge::cli::{Cli, Commands};
use concierge::config::AppConfig;
use concierge::handlers;
use concierge::repl;
use concierge::services::calendar::GoogleCalendar;
use concierge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(brand) = cli.brand {
        config.brand = brand;
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            config.validate()?;
            let state = Arc::new(AppState::from_config(config.clone())?);
            let app = handlers::router(state);

            let addr = format!("0.0.0.0:{}", config.port);
            tracing::info!("starting server on {addr}");

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Chat => {
            config.validate()?;
            let state = Arc::new(AppState::from_config(config)?);
            repl::run_chat(state).await?;
        }
        Commands::Upcoming => {
            let calendar = GoogleCalendar::new(
                config.google_calendar_base_url.clone(),
                config.google_token_path.clone(),
                config.calendar_page_size,
                config.http_timeout(),
            )?;
            repl::print_upcoming(&calendar).await?;
        }
    }

    Ok(())
}

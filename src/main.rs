use crate::cli::{Cli, Commands, DashboardArgs, RangeArgs};
use crate::client::PredictionClient;
use crate::config::Settings;
use crate::dashboard::{Dashboard, RangeView};
use crate::engine::PredictionEngine;
use crate::error::parse_date;
use crate::routes::{router, AppState};
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod asset;
mod cli;
mod client;
mod config;
mod dashboard;
mod data;
mod engine;
mod error;
mod predictor;
mod routes;
mod series;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&settings).await,
        Commands::Dashboard(args) => dashboard(&settings, args).await,
        Commands::Range(args) => range(&settings, args).await,
    }
}

async fn serve(settings: &Settings) -> Result<()> {
    let today = Utc::now().date_naive();
    let engine = PredictionEngine::synthetic(
        settings.predictor.build(),
        settings.seq_length,
        settings.series_start,
        today,
        settings.seed,
    );
    info!(
        "Serving {} predictions over a {}-bar window",
        engine.predictor_name(),
        engine.seq_length()
    );
    let app = router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

fn client(settings: &Settings, api: Option<&str>) -> Result<PredictionClient> {
    let base = api.unwrap_or(&settings.api_url);
    let client = PredictionClient::new(base, settings.timeout)?;
    info!("Using prediction API at {}", client.base_url());
    Ok(client)
}

async fn dashboard(settings: &Settings, args: DashboardArgs) -> Result<()> {
    let client = client(settings, args.api.as_deref())?;
    let today = Utc::now().date_naive();
    let mut dashboard = Dashboard::seeded(today, &mut rand::rng());

    if let Some(raw) = args.date.as_deref() {
        dashboard.select_date(parse_date(raw)?);
        dashboard.predict_all(&client).await;
    }

    print!("{dashboard}");
    Ok(())
}

async fn range(settings: &Settings, args: RangeArgs) -> Result<()> {
    let asset = asset::find(&args.ticker).ok_or_else(|| anyhow!("unknown ticker {}", args.ticker))?;
    let client = client(settings, args.api.as_deref())?;

    let mut view = RangeView::new(asset);
    view.load_history(&client).await;

    match (args.date, args.start, args.end) {
        (Some(date), _, _) => view.predict_single(parse_date(&date)?, &client).await,
        (None, Some(start), Some(end)) => {
            view.predict_range(parse_date(&start)?, parse_date(&end)?, &client)
                .await
        }
        _ => {}
    }

    print!("{view}");
    Ok(())
}

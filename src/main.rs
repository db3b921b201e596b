mod config;
mod db;
mod routes;
mod services;
mod state;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }
    let config = Config::from_env()?;

    let pool = db::init_pool(&config).await?;
    let state = state::AppState::new(pool);

    let app = routes::app(state, config.cors_allow_origin.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, "photowall listening");
    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cfg::Config;
use crate::directory::{seed_directory, InMemoryUserDirectory};
use crate::state::State;
use anyhow::Result;
use tokenauth::TokenService;
use tracing::{info, Level};

//--------------------------------------------------------------------------------------------------

mod app;
mod cfg;
mod directory;
mod handlers;
mod response;
mod roles;
mod state;
mod types;

//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let cfg: Config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::File::with_name("config.local").required(false))
        .add_source(config::Environment::with_prefix("TOKENAUTH").separator("__"))
        .build()?
        .try_deserialize()?;

    // Initialize tracing
    let mut fmt_sub = tracing_subscriber::fmt();
    if cfg.debug {
        fmt_sub = fmt_sub.with_max_level(Level::DEBUG);
    } else {
        fmt_sub = fmt_sub.with_max_level(Level::INFO);
    }
    fmt_sub.init();

    // Load the signing key - a bad key means we can't serve anything, so bail
    let key_material = cfg.key_material()?;
    info!(
        "Signing key loaded, access tokens live {} ms, refresh tokens {} ms",
        key_material.access_lifetime().whole_milliseconds(),
        key_material.refresh_lifetime().whole_milliseconds()
    );

    // Seed the directory
    let directory = InMemoryUserDirectory::default();
    seed_directory(&directory, cfg.users).await?;

    // Create state
    let state = State::new(TokenService::new(key_material), directory);

    // Run the API
    let bind_addr = format!("0.0.0.0:{}", cfg.http_port.unwrap_or(3001));
    info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app::app(state.into())).await?;

    Ok(())
}

//--------------------------------------------------------------------------------------------------

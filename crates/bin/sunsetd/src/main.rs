//! # sunsetd: sunset daemon
//!
//! Composition root that wires the engine to its adapters and starts the
//! server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize structured logging
//! - Construct the light integration and the status bus
//! - Construct the engine and its driver, injecting adapters via port traits
//! - Build the axum router around the driver handle and the status bus
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::future::IntoFuture;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use sunset_adapter_http_axum::state::AppState;
use sunset_adapter_virtual::VirtualLights;
use sunset_app::driver::{DEFAULT_PERIOD, EngineDriver};
use sunset_app::engine::Engine;
use sunset_app::status_bus::InProcessStatusBus;
use sunset_domain::time;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let settings = config.settings()?;
    tracing::info!(
        evening = %settings.schedule.evening,
        night = %settings.schedule.night,
        morning = %settings.schedule.morning,
        bed = ?settings.schedule.bed.map(|bed| bed.to_string()),
        day_color_temp = %settings.color.day,
        night_color_temp = %settings.color.night,
        night_brightness = settings.brightness.night,
        "schedule loaded"
    );

    // Lights
    let lights = if config.integrations.virtual_enabled {
        tracing::info!("virtual lights enabled");
        Arc::new(VirtualLights::demo())
    } else {
        tracing::warn!("no light integration enabled, the engine will idle");
        Arc::new(VirtualLights::default())
    };

    // Engine
    let bus = Arc::new(InProcessStatusBus::new());
    let engine = Engine::new(
        &settings,
        Arc::clone(&lights),
        Arc::clone(&lights),
        Arc::clone(&lights),
        Arc::clone(&bus),
        time::now(),
    )?;
    let (driver, handle) = EngineDriver::new(engine, DEFAULT_PERIOD);

    // HTTP
    let app = sunset_adapter_http_axum::router::build(AppState::new(handle, bus));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("sunsetd listening on http://{bind_addr}");

    let (stop, stopped) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for(stopped.clone()))
        .into_future();
    let signal = async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received");
        let _ = stop.send(true);
    };

    let (served, (), ()) = tokio::join!(server, driver.run(wait_for(stopped)), signal);
    served?;

    tracing::info!("sunsetd stopped");
    Ok(())
}

async fn wait_for(mut stopped: watch::Receiver<bool>) {
    // A dropped sender counts as a stop.
    let _ = stopped.wait_for(|stop| *stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

//! Restaurant service binary.
//!
//! Startup sequence:
//! 1. Initialize logging
//! 2. Load configuration (env, then CLI overrides) and validate it
//! 3. Bind the listener (exit on failure)
//! 4. Register with the broker in the background and serve until Ctrl+C

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use restaurant_service::{RestaurantService, ServiceConfig};
use service_telemetry::{init_logging, TelemetryConfig};

/// Restaurant service: subscribes to order events and receives broker pushes
#[derive(Parser, Debug)]
#[command(name = "restaurant-service", version)]
#[command(about = "Subscribes to broker events and serves the restaurant endpoints")]
struct Args {
    /// Listen address (overrides HOST)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Broker subscribe endpoint (overrides BROKER_URL)
    #[arg(long)]
    broker_url: Option<String>,

    /// URL advertised to the broker for event delivery (overrides CALLBACK_URL)
    #[arg(long)]
    callback_url: Option<String>,

    /// Topic to subscribe to (overrides SUBSCRIBE_TOPIC)
    #[arg(short, long)]
    topic: Option<String>,

    /// Warm-up delay before registering, in milliseconds (overrides SUBSCRIBE_DELAY_MS)
    #[arg(long)]
    subscribe_delay_ms: Option<u64>,
}

impl Args {
    fn apply(self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(host) = self.host {
            config.http.host = host;
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if let Some(url) = self.broker_url {
            config.broker.subscribe_url = url;
        }
        if let Some(url) = self.callback_url {
            config.broker.callback_url = url;
        }
        if let Some(topic) = self.topic {
            config.broker.topic = topic;
        }
        if let Some(ms) = self.subscribe_delay_ms {
            config.broker.warmup_delay = std::time::Duration::from_millis(ms);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&TelemetryConfig::for_service("restaurant-service"))
        .context("Failed to initialize logging")?;

    let config = args.apply(ServiceConfig::from_env());
    info!(
        port = config.http.port,
        broker = %config.broker.subscribe_url,
        "Starting restaurant service v{}",
        restaurant_service::VERSION
    );

    let service = RestaurantService::new(config).context("Invalid configuration")?;
    service
        .start(shutdown_signal())
        .await
        .context("Restaurant service failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

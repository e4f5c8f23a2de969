//! Restaurant service - process lifecycle.
//!
//! Binds the listener, starts the one-shot broker registration on its own
//! task and serves the event, menu and health routes until shutdown.

use crate::adapters::{HttpBrokerClient, LoggingFulfillment};
use crate::domain::{Menu, ServiceConfig, ServiceError, SubscriptionRequest};
use crate::ports::{BrokerClient, Fulfillment};
use crate::receiver::ReceiverState;
use crate::router::{build_router, AppState};
use crate::subscriber::{Subscriber, SubscriptionTracker};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Restaurant service state
pub struct RestaurantService {
    config: ServiceConfig,
    broker: Arc<dyn BrokerClient>,
    fulfillment: Arc<dyn Fulfillment>,
    menu: Arc<Menu>,
    tracker: SubscriptionTracker,
}

impl RestaurantService {
    /// Create a new service with the HTTP broker client and logging fulfillment.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;

        let broker = Arc::new(HttpBrokerClient::from_config(&config.broker)?);

        Ok(Self {
            config,
            broker,
            fulfillment: Arc::new(LoggingFulfillment),
            menu: Arc::new(Menu::standard()),
            tracker: SubscriptionTracker::new(),
        })
    }

    /// Replace the broker registration channel.
    pub fn with_broker_client(mut self, broker: Arc<dyn BrokerClient>) -> Self {
        self.broker = broker;
        self
    }

    /// Replace the processing step for accepted events.
    pub fn with_fulfillment(mut self, fulfillment: Arc<dyn Fulfillment>) -> Self {
        self.fulfillment = fulfillment;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Registration outcome, shared with the health endpoint.
    pub fn subscription(&self) -> SubscriptionTracker {
        self.tracker.clone()
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let state = AppState {
            receiver: ReceiverState::new(
                Arc::clone(&self.fulfillment),
                self.config.limits.max_event_size,
            ),
            menu: Arc::clone(&self.menu),
            subscription: self.tracker.clone(),
        };
        build_router(&self.config, state)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    ///
    /// A bind failure is the only fatal error.
    pub async fn start<F>(self, shutdown: F) -> Result<(), ServiceError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr).await.map_err(|source| {
            error!(addr = %addr, error = %source, "Failed to bind listener");
            ServiceError::Bind { addr, source }
        })?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    ///
    /// The broker registration runs concurrently and never delays serving.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServiceError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr: Option<SocketAddr> = listener.local_addr().ok();
        let router = self.router();

        let subscriber = Subscriber::new(
            SubscriptionRequest::new(&self.config.broker.topic, &self.config.broker.callback_url),
            Arc::clone(&self.broker),
            self.config.broker.warmup_delay,
        );
        let subscription = subscriber.spawn(self.tracker.clone());

        info!(
            addr = ?local_addr,
            events_path = %self.config.events_path(),
            topic = %self.config.broker.topic,
            "Restaurant service listening"
        );

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServiceError::Server);

        subscription.abort();
        info!("Restaurant service stopped");
        result
    }
}

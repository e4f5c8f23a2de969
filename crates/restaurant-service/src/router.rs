use crate::domain::{Menu, ServiceConfig, HEALTH_PATH, MENU_PATH};
use crate::middleware::{TimeoutLayer, TracingLayer};
use crate::receiver::{self, ReceiverState};
use crate::subscriber::{SubscriptionStatus, SubscriptionTracker};
use axum::{
    extract::{DefaultBodyLimit, FromRef, State},
    handler::Handler,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "restaurant-service";

/// Application state shared across handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub receiver: ReceiverState,
    pub menu: Arc<Menu>,
    pub subscription: SubscriptionTracker,
}

/// Build the HTTP router: event callback, menu and health routes.
///
/// The event route is mounted at the path of the advertised callback URL,
/// which [`ServiceConfig::validate`] keeps clear of the fixed routes.
/// Only the POST handler is size limited, so other methods get 405 first.
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(config.timeouts.clone()));

    let handle_event = receiver::handle_event
        .layer(RequestBodyLimitLayer::new(config.limits.max_event_size));

    Router::new()
        .route(
            &config.events_path(),
            post(handle_event).fallback(receiver::method_not_allowed),
        )
        .route(
            MENU_PATH,
            get(get_menu).fallback(receiver::method_not_allowed),
        )
        .route(
            HEALTH_PATH,
            get(health_check).fallback(receiver::method_not_allowed),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(middleware)
        .with_state(state)
}

async fn get_menu(State(menu): State<Arc<Menu>>) -> Json<Menu> {
    Json(menu.as_ref().clone())
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub subscription: SubscriptionStatus,
}

async fn health_check(State(subscription): State<SubscriptionTracker>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: SERVICE_NAME,
        subscription: subscription.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LoggingFulfillment;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_router(config: &ServiceConfig) -> Router {
        let state = AppState {
            receiver: ReceiverState::new(
                Arc::new(LoggingFulfillment),
                config.limits.max_event_size,
            ),
            menu: Arc::new(Menu::standard()),
            subscription: SubscriptionTracker::new(),
        };
        build_router(config, state)
    }

    async fn send(router: Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, String) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_event_accepted() {
        let router = test_router(&ServiceConfig::default());
        let (status, body) = send(
            router,
            Method::POST,
            "/events",
            r#"{"orderId": 42, "items": ["Pizza"]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_event_parse_error() {
        let router = test_router(&ServiceConfig::default());
        let (status, body) = send(router, Method::POST, "/events", "not-json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("expected ident"));
    }

    #[tokio::test]
    async fn test_event_wrong_method() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let router = test_router(&ServiceConfig::default());
            let (status, body) = send(router, method, "/events", r#"{"orderId": 1}"#).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body, "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_event_path_follows_callback_url() {
        let mut config = ServiceConfig::default();
        config.broker.callback_url = "http://restaurant:8080/hooks/orders".to_string();

        let (status, _) = send(test_router(&config), Method::POST, "/hooks/orders", "{}").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(test_router(&config), Method::POST, "/events", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_event_rejected() {
        let mut config = ServiceConfig::default();
        config.limits.max_event_size = 16;
        let (status, _) = send(
            test_router(&config),
            Method::POST,
            "/events",
            r#"{"orderId": 42, "items": ["Pizza", "Burger", "Soda"]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_wrong_method_wins_over_body_limit() {
        let mut config = ServiceConfig::default();
        config.limits.max_event_size = 16;
        let body = r#"{"orderId": 42, "items": ["Pizza", "Burger", "Soda"], "x": 1}"#;

        let response = test_router(&config)
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/events")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Method not allowed");
    }

    #[tokio::test]
    async fn test_oversized_event_with_content_length_rejected() {
        let mut config = ServiceConfig::default();
        config.limits.max_event_size = 16;
        let body = r#"{"orderId": 42, "items": ["Pizza", "Burger", "Soda"]}"#;

        let response = test_router(&config)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/events")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_menu() {
        let response = test_router(&ServiceConfig::default())
            .oneshot(Request::builder().uri("/menu").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let menu: Menu = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(menu, Menu::standard());
    }

    #[tokio::test]
    async fn test_menu_wrong_method() {
        let (status, _) = send(test_router(&ServiceConfig::default()), Method::POST, "/menu", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_wrong_method() {
        let (status, body) =
            send(test_router(&ServiceConfig::default()), Method::POST, "/health", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method not allowed");
    }

    #[tokio::test]
    async fn test_health_reports_pending_subscription() {
        let (status, body) = send(test_router(&ServiceConfig::default()), Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], SERVICE_NAME);
        assert_eq!(json["subscription"]["state"], "pending");
    }
}

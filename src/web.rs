//! Webhook trigger surface
//!
//! A single POST route runs one retrieval synchronously and returns the raw
//! forecast in a JSON body; a GET health check answers unconditionally.
//! Each request launches its own browser session, so overlapping requests
//! scrape independently.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::scraper::ForecastSource;

/// Body of the `POST /webhook` response
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<String>,
}

/// Body of the `GET /health` response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Build the webhook router around a forecast source
pub fn router(source: Arc<dyn ForecastSource>) -> Router {
    Router::new()
        .route("/webhook", post(trigger_scrape))
        .route("/health", get(health))
        .with_state(source)
}

async fn trigger_scrape(
    State(source): State<Arc<dyn ForecastSource>>,
) -> (StatusCode, Json<WebhookResponse>) {
    info!("webhook triggered, starting scraper");

    match source.fetch().await {
        Ok(forecast) => (
            StatusCode::OK,
            Json(WebhookResponse {
                success: true,
                message: "Forecast scraped successfully".to_string(),
                forecast: Some(forecast),
            }),
        ),
        Err(error) => {
            error!(%error, "scraper failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse {
                    success: false,
                    message: error.to_string(),
                    forecast: None,
                }),
            )
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Bind and serve the webhook router until the process exits
pub async fn run(source: Arc<dyn ForecastSource>, config: &ServerConfig) -> anyhow::Result<()> {
    let app = router(source);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Webhook server listening on http://{addr}");
    info!("Trigger scraper with: POST http://{addr}/webhook");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Result, ScrapeError};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct FixedSource(&'static str);

    #[async_trait]
    impl ForecastSource for FixedSource {
        async fn fetch(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ForecastSource for FailingSource {
        async fn fetch(&self) -> Result<String> {
            Err(ScrapeError::no_content("forecast body field was empty"))
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_ok_with_parsable_timestamp() {
        let app = router(Arc::new(FailingSource));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_webhook_success_returns_forecast() {
        let app = router(Arc::new(FixedSource("Solid groundswell due")));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["forecast"], "Solid groundswell due");
        assert_eq!(body["message"], "Forecast scraped successfully");
    }

    #[tokio::test]
    async fn test_webhook_failure_returns_500_with_message() {
        let app = router(Arc::new(FailingSource));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(!body["message"].as_str().unwrap().is_empty());
        assert!(body.get("forecast").is_none());
    }
}

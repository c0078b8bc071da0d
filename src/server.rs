/*!
 * HTTP surface built on axum.
 *
 * - `/api/translate`: every verb is routed to the shared request handler,
 *   which answers non-POST requests with 405
 * - `/health`: liveness probe
 */

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use bytes::Bytes;
use log::{error, info};
use serde_json::json;
use std::sync::Arc;

use crate::api::{self, AppState};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/translate", any(translate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn translate_handler(State(state): State<Arc<AppState>>, method: Method, body: Bytes) -> Response {
    let reply = api::handle(state, method.as_str(), &body).await;
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = (status, Json(reply.body)).into_response();
    if status == StatusCode::METHOD_NOT_ALLOWED {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("POST"));
    }
    response
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Bind `bind_address` and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>, bind_address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind server to {}", bind_address))?;

    info!("Translation server listening on http://{}", bind_address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

/// Resolve on Ctrl-C
///
/// If the signal handler cannot be installed the server keeps running until
/// the process is killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down translation server"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}

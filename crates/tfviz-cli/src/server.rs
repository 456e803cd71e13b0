//! Read-only HTTP endpoint for the extracted diagram graph.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use console::style;
use serde_json::json;

use tfviz_core::config::DiagramGraph;

/// Shared application state. The graph is immutable once served.
#[derive(Clone)]
struct AppState {
    graph: Arc<DiagramGraph>,
}

fn build_router(graph: DiagramGraph) -> Router {
    let state = AppState {
        graph: Arc::new(graph),
    };
    Router::new()
        .route("/api/diagram", get(diagram_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn diagram_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.graph.as_ref().clone())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "resources": state.graph.resources.len(),
        "dependencies": state.graph.dependencies.len(),
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
    }
}

/// Serve `graph` until interrupted.
pub fn serve(graph: DiagramGraph, host: &str, port: u16) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind((host, port)).await?;
        let addr = listener.local_addr()?;
        println!(
            "\n  {} http://{addr}/api/diagram",
            style("Serving diagram at").green()
        );
        log::info!("listening on {addr}");
        axum::serve(listener, build_router(graph))
            .with_graceful_shutdown(shutdown_signal())
            .await
    })
}

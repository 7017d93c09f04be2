use crate::mcp::{McpRequest, McpResponse};
use crate::CoinPulseServer;
use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    server: Arc<CoinPulseServer>,
}

async fn handle_rpc(State(state): State<AppState>, Json(req): Json<McpRequest>) -> Json<McpResponse> {
    let res = state.server.handle_request(req).await;
    Json(res)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let (cached, fresh) = state.server.market_data().cache().stats();
    Json(json!({ "ok": true, "cache": { "entries": cached, "fresh": fresh } }))
}

pub fn router(server: Arc<CoinPulseServer>) -> Router {
    Router::new()
        .route("/rpc", post(handle_rpc))
        .route("/health", get(health))
        .with_state(AppState { server })
}

pub async fn run_http_server(server: CoinPulseServer, port: u16) -> Result<()> {
    let app = router(Arc::new(server));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP MCP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

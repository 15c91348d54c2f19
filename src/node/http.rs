//! HTTP API for the storage node

use crate::common::{Error, Result};
use crate::node::store::BlockStore;
use axum::{
    extract::{Path, State},
    Json, Router,
};
use bytes::Bytes;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Shared storage node state for HTTP handlers.
#[derive(Clone)]
pub struct NodeState {
    pub store: Arc<BlockStore>,
    pub node_id: String,
}

pub fn create_router(state: NodeState) -> Router {
    Router::new()
        .route("/blocks/:id", axum::routing::put(write_block))
        .route("/blocks/:id", axum::routing::get(read_block))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn parse_block_id(id: &str) -> Result<Uuid> {
    id.parse()
        .map_err(|_| Error::BadRequest(format!("malformed block id: {}", id)))
}

/// Persist block bytes. Acks only after the bytes are durable.
async fn write_block(
    State(state): State<NodeState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let block_id = parse_block_id(&id)?;
    if body.is_empty() {
        return Err(Error::BadRequest("empty block body".into()));
    }
    state.store.put(&block_id, &body)?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// Return the bytes last stored under this block id.
async fn read_block(State(state): State<NodeState>, Path(id): Path<String>) -> Result<Vec<u8>> {
    let block_id = parse_block_id(&id)?;
    state.store.get(&block_id)
}

async fn health(State(state): State<NodeState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "node_id": state.node_id,
        "blocks": state.store.block_count().unwrap_or(0),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

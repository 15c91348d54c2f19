//! HTTP API for the coordinator
//!
//! Thin handlers over [`Coordinator`]: heartbeat ingestion, file allocation
//! and resolution, and read-only listings. Framing stays out of the core;
//! handlers translate JSON to core calls and `Error` to a status code.

use crate::common::{timestamp_now, Error, Result};
use crate::coordinator::core::Coordinator;
use crate::coordinator::metadata::{BlockDescriptor, BlockId};
use axum::{
    extract::{Query, State},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared coordinator state for HTTP handlers.
#[derive(Clone)]
pub struct CoordState {
    pub coordinator: Arc<Coordinator>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllocateRequest {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllocateResponse {
    pub block_id: BlockId,
    pub replicas: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub name: String,
    pub size: u64,
    pub blocks: Vec<BlockDescriptor>,
}

/// Creates the HTTP router with all coordinator endpoints.
pub fn create_router(state: CoordState) -> Router {
    Router::new()
        .route("/heartbeat", axum::routing::post(heartbeat))
        .route("/allocate", axum::routing::post(allocate))
        .route("/resolve", axum::routing::get(resolve))
        .route("/files", axum::routing::get(list_files))
        .route("/nodes", axum::routing::get(list_nodes))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Receive a liveness signal from a storage node.
async fn heartbeat(
    State(state): State<CoordState>,
    Json(req): Json<HeartbeatRequest>,
) -> Result<Json<serde_json::Value>> {
    state.coordinator.register_liveness(&req.address)?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// Allocate placement for a new file upload.
async fn allocate(
    State(state): State<CoordState>,
    Json(req): Json<AllocateRequest>,
) -> Result<Json<AllocateResponse>> {
    let descriptor = state.coordinator.allocate_file(&req.name, req.size)?;
    Ok(Json(AllocateResponse {
        block_id: descriptor.block_id,
        replicas: descriptor.replicas,
    }))
}

/// Resolve a file to its block locations for download.
async fn resolve(
    State(state): State<CoordState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>> {
    if query.name.is_empty() {
        return Err(Error::BadRequest("missing file name".into()));
    }
    let (size, blocks) = state.coordinator.resolve_file(&query.name)?;
    Ok(Json(ResolveResponse {
        name: query.name,
        size,
        blocks,
    }))
}

async fn list_files(State(state): State<CoordState>) -> Json<Vec<String>> {
    Json(state.coordinator.list_files())
}

async fn list_nodes(State(state): State<CoordState>) -> Json<Vec<String>> {
    Json(state.coordinator.list_live_nodes())
}

/// Health check endpoint with minimal cluster status.
async fn health(State(state): State<CoordState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "live_nodes": state.coordinator.list_live_nodes().len(),
        "files": state.coordinator.file_count(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": timestamp_now(),
    }))
}

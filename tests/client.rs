//! Client orchestration tests against a live coordinator HTTP server

use minidfs::coordinator::http::{create_router, CoordState};
use minidfs::coordinator::{Coordinator, NodeRegistry};
use minidfs::{DfsClient, Error};
use std::sync::Arc;
use std::time::Duration;

/// Serve the coordinator API on an ephemeral port, returning the shared
/// core handle and the base URL.
async fn spawn_coordinator() -> (Arc<Coordinator>, String) {
    let registry = Arc::new(NodeRegistry::new(Duration::from_secs(10)));
    let coordinator = Arc::new(Coordinator::new(registry, 3));
    let router = create_router(CoordState {
        coordinator: Arc::clone(&coordinator),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (coordinator, format!("http://{}", addr))
}

#[tokio::test]
async fn test_heartbeat_and_list_nodes() {
    let (_coordinator, url) = spawn_coordinator().await;
    let client = DfsClient::new(url);

    client.heartbeat("http://n1:5001").await.unwrap();
    client.heartbeat("http://n2:5002").await.unwrap();

    let nodes = client.list_nodes().await.unwrap();
    assert_eq!(nodes, vec!["http://n1:5001", "http://n2:5002"]);
}

#[tokio::test]
async fn test_heartbeat_rejects_malformed_address() {
    let (_coordinator, url) = spawn_coordinator().await;
    let client = DfsClient::new(url);

    assert!(matches!(
        client.heartbeat("not a url").await,
        Err(Error::BadRequest(_))
    ));
    assert!(client.list_nodes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_download_missing_file_is_not_found() {
    let (_coordinator, url) = spawn_coordinator().await;
    let client = DfsClient::new(url);

    assert!(matches!(
        client.download("missing.txt").await,
        Err(Error::FileNotFound(_))
    ));
}

#[tokio::test]
async fn test_download_with_inflated_declared_size_errors_cleanly() {
    let (coordinator, url) = spawn_coordinator().await;
    let client = DfsClient::new(url);

    // The declared size is caller-supplied and never checked against actual
    // data. An absurd declaration must not be able to crash readers: the
    // download has to fail with an error once no replica answers, not abort
    // on allocation before the first block fetch.
    coordinator.register_liveness("http://127.0.0.1:9").unwrap();
    coordinator.allocate_file("huge.bin", u64::MAX).unwrap();

    assert!(matches!(
        client.download("huge.bin").await,
        Err(Error::BlockNotFound(_))
    ));
}

//! Client orchestration for uploads and downloads
//!
//! The client is the only component on the data path. Writes ask the
//! coordinator for placement, then push bytes to every selected replica.
//! Reads ask the coordinator for locations, then pull each block from the
//! first replica that answers. Retry across replicas lives here, not in
//! the coordinator.

use crate::common::{Error, Result};
use crate::coordinator::http::{
    AllocateRequest, AllocateResponse, HeartbeatRequest, ResolveResponse,
};

pub struct DfsClient {
    http: reqwest::Client,
    coordinator_url: String,
}

impl DfsClient {
    pub fn new(coordinator_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            coordinator_url: coordinator_url.into(),
        }
    }

    /// Upload `data` under `name`: allocate placement, then push the block
    /// to every replica. Individual replica failures are tolerated; the
    /// upload fails only if no replica accepted the bytes.
    pub async fn upload(&self, name: &str, data: &[u8]) -> Result<AllocateResponse> {
        let resp = self
            .http
            .post(format!("{}/allocate", self.coordinator_url))
            .json(&AllocateRequest {
                name: name.to_string(),
                size: data.len() as u64,
            })
            .send()
            .await?;
        let alloc: AllocateResponse = check(resp).await?.json().await?;

        tracing::info!(
            "Allocated block {} on {:?}",
            alloc.block_id,
            alloc.replicas
        );

        let mut stored = 0;
        for node_url in &alloc.replicas {
            let url = format!("{}/blocks/{}", node_url, alloc.block_id);
            match self.http.put(&url).body(data.to_vec()).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!("Stored replica on {}", node_url);
                    stored += 1;
                }
                Ok(resp) => {
                    tracing::warn!("Node {} rejected block: {}", node_url, resp.status());
                }
                Err(e) => {
                    tracing::warn!("Failed to reach node {}: {}", node_url, e);
                }
            }
        }

        if stored == 0 {
            return Err(Error::Http(format!(
                "no replica accepted block {}",
                alloc.block_id
            )));
        }
        Ok(alloc)
    }

    /// Download `name`: resolve block locations, then pull each block from
    /// the first replica that answers, in file order.
    pub async fn download(&self, name: &str) -> Result<Vec<u8>> {
        let resp = self
            .http
            .get(format!("{}/resolve", self.coordinator_url))
            .query(&[("name", name)])
            .send()
            .await?;
        let resolved: ResolveResponse = check(resp).await?.json().await?;

        // The declared size is caller-supplied metadata, never verified
        // against actual data, so it must not drive allocation. Growth
        // follows the fetched blocks' real lengths.
        let mut content = Vec::new();
        for block in &resolved.blocks {
            let mut fetched = false;
            for node_url in &block.replicas {
                let url = format!("{}/blocks/{}", node_url, block.block_id);
                match self.http.get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        content.extend_from_slice(&resp.bytes().await?);
                        fetched = true;
                        break;
                    }
                    Ok(resp) => {
                        tracing::warn!(
                            "Node {} failed for block {}: {}",
                            node_url,
                            block.block_id,
                            resp.status()
                        );
                    }
                    Err(e) => {
                        tracing::warn!("Failed to reach node {}: {}", node_url, e);
                    }
                }
            }
            if !fetched {
                return Err(Error::BlockNotFound(format!(
                    "block {} unavailable on all replicas",
                    block.block_id
                )));
            }
        }
        Ok(content)
    }

    pub async fn list_files(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(format!("{}/files", self.coordinator_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn list_nodes(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(format!("{}/nodes", self.coordinator_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Send a one-off heartbeat on behalf of a node address. Mostly useful
    /// for scripting and tests.
    pub async fn heartbeat(&self, address: &str) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}/heartbeat", self.coordinator_url))
            .json(&HeartbeatRequest {
                address: address.to_string(),
            })
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Map a non-success coordinator response to the matching error variant.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    use reqwest::StatusCode;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => Error::FileNotFound(body),
        StatusCode::BAD_REQUEST => Error::BadRequest(body),
        StatusCode::SERVICE_UNAVAILABLE => Error::NoNodesAvailable,
        _ => Error::Http(format!("{}: {}", status, body)),
    })
}

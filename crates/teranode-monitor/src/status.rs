//! Node status snapshot types and the aggregator.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::MonitorConfig;
use crate::rpc::NodeRpc;
use crate::sync;

/// One row of the peer table, projected from a `getpeerinfo` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerSummary {
    pub addr: String,
    pub subver: String,
    pub synced_blocks: u64,
}

/// One aggregated status snapshot.
///
/// Produced fresh per aggregation and immutable once built — no field ever
/// carries data from a previous attempt. Serializes to the machine view's
/// wire format directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatus {
    pub online: bool,
    pub error: Option<String>,
    pub block_height: u64,
    pub best_block_hash: String,
    pub chain: String,
    pub difficulty: f64,
    pub connections: u64,
    pub version: u64,
    pub protocol_version: u64,
    pub verification_progress: f64,
    pub sync_percentage: f64,
    pub target_height: u64,
    pub blocks_remaining: i64,
    pub mempool_size: u64,
    pub mempool_bytes: u64,
    pub peers: Vec<PeerSummary>,
    pub last_update: String,
}

/// Minimal projection consumed by automated health checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub block_height: u64,
    pub connections: u64,
}

impl NodeStatus {
    /// Baseline snapshot: everything zero/empty except the target fields,
    /// which reflect configuration even when the node is unreachable.
    fn offline(config: &MonitorConfig) -> Self {
        Self {
            online: false,
            error: None,
            block_height: 0,
            best_block_hash: String::new(),
            chain: String::new(),
            difficulty: 0.0,
            connections: 0,
            version: 0,
            protocol_version: 0,
            verification_progress: 0.0,
            sync_percentage: 0.0,
            target_height: config.target_height,
            blocks_remaining: sync::blocks_remaining(0, config.target_height),
            mempool_size: 0,
            mempool_bytes: 0,
            peers: Vec::new(),
            last_update: now_timestamp(),
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            healthy: self.online,
            block_height: self.block_height,
            connections: self.connections,
        }
    }
}

fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Run one full aggregation against the node and assemble a snapshot.
///
/// The primary `getblockchaininfo` call is load-bearing: a transport
/// failure there surfaces through the `error` field and short-circuits the
/// three secondary calls. Secondary failures are absorbed silently —
/// partial information is preferable to none.
pub async fn collect_status<R: NodeRpc>(rpc: &R, config: &MonitorConfig) -> NodeStatus {
    let mut status = NodeStatus::offline(config);

    let chain_info = match rpc.call("getblockchaininfo", &[]).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "getblockchaininfo failed");
            status.error = Some(e.to_string());
            return status;
        }
    };

    if let Some(info) = chain_info.as_object() {
        status.online = true;
        status.block_height = info.get("blocks").and_then(Value::as_u64).unwrap_or(0);
        status.best_block_hash = sync::display_hash(
            info.get("bestblockhash")
                .and_then(Value::as_str)
                .unwrap_or(""),
        );
        status.chain = info
            .get("chain")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        status.difficulty = info.get("difficulty").and_then(Value::as_f64).unwrap_or(0.0);
        status.verification_progress = info
            .get("verificationprogress")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        status.blocks_remaining =
            sync::blocks_remaining(status.block_height, config.target_height);
        status.sync_percentage =
            sync::sync_percentage(status.block_height, config.target_height);
    }

    match rpc.call("getinfo", &[]).await {
        Ok(node_info) => {
            if let Some(info) = node_info.as_object() {
                status.connections = info
                    .get("connections")
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                status.version = info.get("version").and_then(Value::as_u64).unwrap_or(0);
                status.protocol_version = info
                    .get("protocolversion")
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
            }
        }
        Err(e) => tracing::warn!(error = %e, "getinfo failed"),
    }

    match rpc.call("getmempoolinfo", &[]).await {
        Ok(mempool) => {
            if let Some(info) = mempool.as_object() {
                status.mempool_size = info.get("size").and_then(Value::as_u64).unwrap_or(0);
                status.mempool_bytes = info.get("bytes").and_then(Value::as_u64).unwrap_or(0);
            }
        }
        Err(e) => tracing::warn!(error = %e, "getmempoolinfo failed"),
    }

    match rpc.call("getpeerinfo", &[]).await {
        Ok(peer_info) => {
            if let Some(list) = peer_info.as_array() {
                status.peers = sync::project_peers(&peer_info);
                // The live peer list is more authoritative than getinfo's
                // summary counter. Full count, not capped at the row limit.
                status.connections = list.len() as u64;
            }
        }
        Err(e) => tracing::warn!(error = %e, "getpeerinfo failed"),
    }

    status.last_update = now_timestamp();
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpcError;
    use serde_json::json;
    use std::collections::HashMap;

    /// RPC stub with one scripted outcome per method. Unscripted methods
    /// fail, so each test states exactly the calls it expects.
    struct ScriptedRpc {
        outcomes: HashMap<&'static str, Result<Value, RpcError>>,
    }

    impl ScriptedRpc {
        fn new(outcomes: Vec<(&'static str, Result<Value, RpcError>)>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
            }
        }
    }

    impl NodeRpc for ScriptedRpc {
        async fn call(&self, method: &str, _params: &[Value]) -> Result<Value, RpcError> {
            match self.outcomes.get(method) {
                Some(Ok(v)) => Ok(v.clone()),
                Some(Err(RpcError::ConnectionRefused)) => Err(RpcError::ConnectionRefused),
                Some(Err(RpcError::Timeout)) => Err(RpcError::Timeout),
                Some(Err(RpcError::Other(msg))) => Err(RpcError::Other(msg.clone())),
                None => Err(RpcError::Other(format!("unscripted method {method}"))),
            }
        }
    }

    fn test_config() -> MonitorConfig {
        MonitorConfig {
            target_height: 928_100,
            ..MonitorConfig::default()
        }
    }

    fn chain_info() -> Value {
        json!({
            "blocks": 900_000,
            "bestblockhash": "000000000000000004a2b1e2f8c6d7a9000000000000000004a2b1e2f8c6d7a9",
            "chain": "main",
            "difficulty": 119.28,
            "verificationprogress": 0.9697,
        })
    }

    fn peer_list(n: u64) -> Value {
        json!((0..n)
            .map(|i| json!({
                "addr": format!("10.0.0.{i}:8333"),
                "subver": "/Teranode:1.0/",
                "synced_blocks": 899_000 + i,
            }))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn primary_failure_yields_offline_snapshot() {
        let rpc = ScriptedRpc::new(vec![(
            "getblockchaininfo",
            Err(RpcError::ConnectionRefused),
        )]);

        let status = collect_status(&rpc, &test_config()).await;

        assert!(!status.online);
        assert_eq!(
            status.error.as_deref(),
            Some("Connection refused - is Teranode running?")
        );
        assert_eq!(status.block_height, 0);
        assert_eq!(status.difficulty, 0.0);
        assert!(status.peers.is_empty());
        // Target fields still reflect configuration.
        assert_eq!(status.target_height, 928_100);
        assert_eq!(status.blocks_remaining, 928_100);
    }

    #[tokio::test]
    async fn primary_timeout_surfaces_timeout_message() {
        let rpc = ScriptedRpc::new(vec![("getblockchaininfo", Err(RpcError::Timeout))]);

        let status = collect_status(&rpc, &test_config()).await;

        assert!(!status.online);
        assert_eq!(status.error.as_deref(), Some("Request timed out"));
        assert_eq!(status.block_height, 0);
    }

    #[tokio::test]
    async fn chain_info_populates_sync_metrics() {
        let rpc = ScriptedRpc::new(vec![
            ("getblockchaininfo", Ok(chain_info())),
            ("getinfo", Ok(json!({"connections": 4, "version": 101, "protocolversion": 70016}))),
            ("getmempoolinfo", Ok(json!({"size": 12, "bytes": 48_000}))),
            ("getpeerinfo", Ok(peer_list(4))),
        ]);

        let status = collect_status(&rpc, &test_config()).await;

        assert!(status.online);
        assert_eq!(status.error, None);
        assert_eq!(status.block_height, 900_000);
        assert_eq!(status.best_block_hash, "0000000000000000...");
        assert_eq!(status.chain, "main");
        assert_eq!(status.blocks_remaining, 28_100);
        assert_eq!(status.sync_percentage, 96.97);
        assert_eq!(status.version, 101);
        assert_eq!(status.mempool_size, 12);
        assert_eq!(status.mempool_bytes, 48_000);
        assert_eq!(status.peers.len(), 4);
        assert_eq!(status.connections, 4);
    }

    #[tokio::test]
    async fn peer_failure_keeps_getinfo_connections() {
        let rpc = ScriptedRpc::new(vec![
            ("getblockchaininfo", Ok(chain_info())),
            ("getinfo", Ok(json!({"connections": 8, "version": 101, "protocolversion": 70016}))),
            ("getmempoolinfo", Ok(json!({"size": 0, "bytes": 0}))),
            ("getpeerinfo", Err(RpcError::Timeout)),
        ]);

        let status = collect_status(&rpc, &test_config()).await;

        assert!(status.online);
        assert_eq!(status.error, None);
        assert_eq!(status.connections, 8);
        assert!(status.peers.is_empty());
    }

    #[tokio::test]
    async fn peer_list_caps_rows_but_not_connection_count() {
        let rpc = ScriptedRpc::new(vec![
            ("getblockchaininfo", Ok(chain_info())),
            ("getinfo", Ok(json!({"connections": 8, "version": 101, "protocolversion": 70016}))),
            ("getmempoolinfo", Ok(json!({"size": 0, "bytes": 0}))),
            ("getpeerinfo", Ok(peer_list(15))),
        ]);

        let status = collect_status(&rpc, &test_config()).await;

        assert_eq!(status.peers.len(), 10);
        assert_eq!(status.connections, 15);
        assert_eq!(status.peers[0].addr, "10.0.0.0:8333");
    }

    #[tokio::test]
    async fn getinfo_failure_is_silent_and_partial() {
        let rpc = ScriptedRpc::new(vec![
            ("getblockchaininfo", Ok(chain_info())),
            ("getinfo", Err(RpcError::Other("boom".to_string()))),
            ("getmempoolinfo", Ok(json!({"size": 5, "bytes": 2_048}))),
            ("getpeerinfo", Ok(peer_list(2))),
        ]);

        let status = collect_status(&rpc, &test_config()).await;

        assert!(status.online);
        assert_eq!(status.error, None);
        assert_eq!(status.version, 0);
        assert_eq!(status.protocol_version, 0);
        assert_eq!(status.mempool_size, 5);
        assert_eq!(status.mempool_bytes, 2_048);
        assert_eq!(status.peers.len(), 2);
        assert_eq!(status.connections, 2);
    }

    #[tokio::test]
    async fn null_chain_result_stays_offline_without_error() {
        // A successful call with no `result` field leaves the node marked
        // offline but still attempts the secondary calls.
        let rpc = ScriptedRpc::new(vec![
            ("getblockchaininfo", Ok(Value::Null)),
            ("getinfo", Ok(json!({"connections": 3, "version": 101, "protocolversion": 70016}))),
            ("getmempoolinfo", Ok(json!({"size": 1, "bytes": 256}))),
            ("getpeerinfo", Ok(peer_list(3))),
        ]);

        let status = collect_status(&rpc, &test_config()).await;

        assert!(!status.online);
        assert_eq!(status.error, None);
        assert_eq!(status.block_height, 0);
        assert_eq!(status.connections, 3);
        assert_eq!(status.mempool_size, 1);
    }

    #[test]
    fn machine_view_uses_wire_keys() {
        let config = test_config();
        let status = NodeStatus::offline(&config);
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["online"], false);
        assert_eq!(json["error"], Value::Null);
        assert_eq!(json["block_height"], 0);
        assert_eq!(json["target_height"], 928_100);
        assert_eq!(json["blocks_remaining"], 928_100);
        assert!(json["peers"].as_array().unwrap().is_empty());
        assert!(json["last_update"].is_string());
    }

    #[test]
    fn health_projection_mirrors_online() {
        let config = test_config();
        let mut status = NodeStatus::offline(&config);
        status.online = true;
        status.block_height = 900_000;
        status.connections = 7;

        let health = status.health();
        assert!(health.healthy);
        assert_eq!(health.block_height, 900_000);
        assert_eq!(health.connections, 7);
    }
}

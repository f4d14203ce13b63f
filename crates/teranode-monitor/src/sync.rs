//! Derived sync metrics.
//!
//! Pure, stateless functions over raw call results. The aggregator applies
//! these to whatever the node returned; none of them touch the network.

use serde_json::Value;

use crate::status::PeerSummary;

/// Peer rows kept in a snapshot. The live connection count is reported
/// separately and is not capped by this limit.
pub const MAX_PEER_ROWS: usize = 10;

/// Sync completion against the configured target, rounded to two decimals.
/// A zero target yields 0 rather than dividing by it.
pub fn sync_percentage(height: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (height as f64 / target as f64 * 100.0 * 100.0).round() / 100.0
}

/// Blocks left until the configured target. Deliberately not clamped at
/// zero: a negative value signals a stale `target_height`.
pub fn blocks_remaining(height: u64, target: u64) -> i64 {
    target as i64 - height as i64
}

/// Truncate a block hash for display: first 16 characters plus an ellipsis
/// marker, or empty if the hash is unavailable.
pub fn display_hash(full: &str) -> String {
    if full.is_empty() {
        return String::new();
    }
    let prefix: String = full.chars().take(16).collect();
    format!("{prefix}...")
}

/// Project the raw `getpeerinfo` result into at most [`MAX_PEER_ROWS`]
/// summaries, preserving the node's reported order. Missing fields default
/// to `"unknown"` (address), empty string (client version), or zero.
pub fn project_peers(raw: &Value) -> Vec<PeerSummary> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .take(MAX_PEER_ROWS)
        .map(|p| PeerSummary {
            addr: p
                .get("addr")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            subver: p
                .get("subver")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            synced_blocks: p.get("synced_blocks").and_then(Value::as_u64).unwrap_or(0),
        })
        .collect()
}

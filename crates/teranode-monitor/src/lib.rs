//! Status aggregation core for monitoring a Teranode BSV node.
//!
//! Issues four independent JSON-RPC calls against the node
//! (`getblockchaininfo`, `getinfo`, `getmempoolinfo`, `getpeerinfo`),
//! tolerates partial failure, and merges the results into a single
//! [`NodeStatus`] snapshot with derived sync metrics. Only the primary
//! chain-info call is load-bearing: its failure marks the node offline,
//! while the three secondary calls fail silently into default values.
//!
//! # Modules
//!
//! - [`config`] — immutable process configuration loaded from the environment
//! - [`rpc`] — authenticated JSON-RPC transport and the [`NodeRpc`] seam
//! - [`sync`] — pure derived-metric functions (sync percentage, blocks
//!   remaining, display hash, peer projection)
//! - [`status`] — snapshot types and the aggregator ([`collect_status`])

pub mod config;
pub mod error;
pub mod rpc;
pub mod status;
pub mod sync;

pub use config::MonitorConfig;
pub use error::RpcError;
pub use rpc::{NodeRpc, RpcClient};
pub use status::{collect_status, HealthStatus, NodeStatus, PeerSummary};

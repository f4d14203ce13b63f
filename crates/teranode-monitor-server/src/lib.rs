//! Web dashboard and JSON API for the Teranode status monitor.
//!
//! Serves an HTML dashboard and two machine-readable views over actix-web.
//! Every inbound request performs a fresh aggregation against the node —
//! there is no caching, no shared snapshot, and no mutable state, so
//! concurrent requests need no locking. Aggregation logic lives in the core
//! [`teranode_monitor`] crate; this crate is the serving surface.
//!
//! # Modules
//!
//! - [`routes`] — HTTP endpoints (dashboard, status, health, metrics)
//! - [`state`] — shared read-only [`AppState`](state::AppState)
//! - [`metrics`] — Prometheus metrics for requests and aggregation outcomes
//! - [`page`] — HTML render of the full view

pub mod metrics;
pub mod page;
pub mod routes;
pub mod state;

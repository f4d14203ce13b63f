//! Monitor configuration from environment variables.

/// Immutable process-wide configuration.
///
/// Built once at startup and passed explicitly into the aggregator and the
/// serving layer — there is no ambient mutable state.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Teranode RPC host (env: TERANODE_HOST).
    pub node_host: String,
    /// Teranode RPC port (env: TERANODE_RPC_PORT, default: 9292).
    pub node_rpc_port: u16,
    /// RPC basic-auth username (env: TERANODE_RPC_USER, default: bitcoin).
    pub rpc_user: String,
    /// RPC basic-auth password (env: TERANODE_RPC_PASS, default: bitcoin).
    pub rpc_pass: String,
    /// Dashboard bind host (env: MONITOR_BIND_HOST, default: 0.0.0.0).
    pub bind_host: String,
    /// Dashboard bind port (env: MONITOR_BIND_PORT, default: 4000).
    pub bind_port: u16,
    /// Target block height used for sync progress (env: TARGET_HEIGHT).
    /// Not derived from the node; update it periodically as the chain grows.
    pub target_height: u64,
    /// Per-call RPC timeout in seconds (env: TERANODE_RPC_TIMEOUT_SECS, default: 10).
    pub rpc_timeout_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            node_host: "127.0.0.1".to_string(),
            node_rpc_port: 9292,
            rpc_user: "bitcoin".to_string(),
            rpc_pass: "bitcoin".to_string(),
            bind_host: "0.0.0.0".to_string(),
            bind_port: 4000,
            target_height: 928_100,
            rpc_timeout_secs: 10,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults above, so
    /// this never fails — a bare environment yields a localhost setup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let node_host = std::env::var("TERANODE_HOST")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.node_host);

        let node_rpc_port: u16 = std::env::var("TERANODE_RPC_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.node_rpc_port);

        let rpc_user = std::env::var("TERANODE_RPC_USER")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.rpc_user);

        let rpc_pass = std::env::var("TERANODE_RPC_PASS")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.rpc_pass);

        let bind_host = std::env::var("MONITOR_BIND_HOST")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.bind_host);

        let bind_port: u16 = std::env::var("MONITOR_BIND_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bind_port);

        let target_height: u64 = std::env::var("TARGET_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.target_height);

        let rpc_timeout_secs: u64 = std::env::var("TERANODE_RPC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.rpc_timeout_secs);

        Self {
            node_host,
            node_rpc_port,
            rpc_user,
            rpc_pass,
            bind_host,
            bind_port,
            target_height,
            rpc_timeout_secs,
        }
    }

    /// Full URL of the node's JSON-RPC endpoint.
    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}/", self.node_host, self.node_rpc_port)
    }
}

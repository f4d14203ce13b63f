use teranode_monitor::{MonitorConfig, RpcClient};

/// Shared application state for the monitor server.
///
/// Both members are established at startup and read-only thereafter; no
/// snapshot or counter is shared across requests.
pub struct AppState {
    pub config: MonitorConfig,
    pub rpc: RpcClient,
}

impl AppState {
    pub fn new(config: MonitorConfig) -> Self {
        let rpc = RpcClient::new(&config);
        Self { config, rpc }
    }
}

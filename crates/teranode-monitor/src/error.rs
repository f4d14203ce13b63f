//! RPC transport error taxonomy.

/// Outcome classification for one remote call.
///
/// The display strings are what the dashboard surfaces verbatim in the
/// snapshot's `error` field when the primary call fails.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The node refused the TCP connection.
    #[error("Connection refused - is Teranode running?")]
    ConnectionRefused,

    /// The call exceeded the configured deadline.
    #[error("Request timed out")]
    Timeout,

    /// Any other failure: malformed response, unexpected HTTP status, DNS.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RpcError::Timeout
        } else if e.is_connect() {
            RpcError::ConnectionRefused
        } else {
            RpcError::Other(e.to_string())
        }
    }
}

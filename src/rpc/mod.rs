//! Client for the node's `/network` RPC group
//!
//! One method per endpoint, all blocking. Each call builds the URL, issues a
//! single request and decodes the body; nothing is cached or retried.

use crate::config::NodeConfig;
use serde::de::DeserializeOwned;
use std::io;
use std::time::Duration;

pub mod connections;
pub mod errors;
pub mod log;
pub mod models;
pub mod peers;

pub use errors::{PartialRemoval, RpcError, RpcResult, STATUS_OK};
pub use models::*;

/// Blocking client for the node's network endpoints
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct NetworkRpc {
    url: String,
    agent: ureq::Agent,
}

impl NetworkRpc {
    /// Client with a default agent and no timeouts
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_agent(url, ureq::Agent::new())
    }

    /// Client using a caller-provided agent
    pub fn with_agent(url: impl Into<String>, agent: ureq::Agent) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        Self { url, agent }
    }

    /// Client with the connect and request timeouts from `cfg`
    pub fn from_config(cfg: &NodeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build();
        Self::with_agent(cfg.url.clone(), agent)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// GET `path` and decode the whole body as `T`
    ///
    /// Decodes straight from the socket, so the body size is not capped.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> RpcResult<T> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);
        let resp = self.agent.get(&url).call()?;
        let reader = io::BufReader::new(resp.into_reader());
        Ok(serde_json::from_reader(reader)?)
    }

    /// Succeeds only on an exact `200 OK`; the body is drained and dropped
    fn expect_ok(resp: ureq::Response) -> RpcResult<()> {
        let status = format!("{} {}", resp.status(), resp.status_text());
        // draining only lets the connection go back to the pool
        if let Err(e) = io::copy(&mut resp.into_reader(), &mut io::sink()) {
            tracing::debug!("discard body of '{}' failed: {}", status, e);
        }
        if status != STATUS_OK {
            return Err(RpcError::Status(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let rpc = NetworkRpc::new("http://127.0.0.1:8732/");
        assert_eq!(rpc.url(), "http://127.0.0.1:8732");
        assert_eq!(
            rpc.endpoint("/network/peers"),
            "http://127.0.0.1:8732/network/peers"
        );
    }

    #[test]
    fn test_from_config() {
        let cfg = NodeConfig {
            url: "http://node:8732".to_string(),
            ..NodeConfig::default()
        };
        assert_eq!(NetworkRpc::from_config(&cfg).url(), "http://node:8732");
    }
}

use super::{ConnectionInfo, NetworkRpc, PartialRemoval, RpcResult};

impl NetworkRpc {
    /// `GET /network/connections`
    pub fn list_connections(&self) -> RpcResult<Vec<ConnectionInfo>> {
        let conns: Vec<ConnectionInfo> = self.get_json("/network/connections")?;
        tracing::debug!("decoded {} connections", conns.len());
        Ok(conns)
    }

    /// `GET /network/connections/<peer_id>`
    ///
    /// `peer_id` goes into the path verbatim. An unknown peer yields whatever
    /// the node answers with.
    pub fn get_connection(&self, peer_id: &str) -> RpcResult<ConnectionInfo> {
        self.get_json(&format!("/network/connections/{}", peer_id))
    }

    /// `DELETE /network/connections/<peer_id>[?wait]`
    ///
    /// With `wait` the node only answers once the connection is torn down.
    pub fn remove_peer(&self, peer_id: &str, wait: bool) -> RpcResult<()> {
        let mut url = self.endpoint(&format!("/network/connections/{}", peer_id));
        if wait {
            url.push_str("?wait");
        }
        tracing::debug!("DELETE {}", url);
        let resp = self.agent.delete(&url).call()?;
        Self::expect_ok(resp)?;
        tracing::info!("removed peer {}", peer_id);
        Ok(())
    }

    /// Remove peers one after the other, in iteration order
    ///
    /// Stops at the first failure. The error carries the peers removed so
    /// far; the remaining ones are not attempted.
    pub fn remove_peers<I, S>(&self, peers: I) -> Result<Vec<String>, PartialRemoval>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut removed = Vec::new();
        for (peer_id, wait) in peers {
            let peer_id = peer_id.into();
            if let Err(error) = self.remove_peer(&peer_id, wait) {
                tracing::warn!(
                    "stop removing peers at {} after {} removal(s): {}",
                    peer_id,
                    removed.len(),
                    error
                );
                return Err(PartialRemoval {
                    removed,
                    peer_id,
                    error,
                });
            }
            removed.push(peer_id);
        }
        Ok(removed)
    }

    /// `GET /network/greylist/clear`
    pub fn clear_greylist(&self) -> RpcResult<()> {
        let url = self.endpoint("/network/greylist/clear");
        tracing::debug!("GET {}", url);
        let resp = self.agent.get(&url).call()?;
        Self::expect_ok(resp)?;
        tracing::info!("greylist cleared");
        Ok(())
    }
}

use super::{GossipPeer, GossipPeerDetails, NetworkRpc, RpcResult};

impl NetworkRpc {
    /// `GET /network/peers`
    ///
    /// The node groups its gossip table, hence the nested lists.
    pub fn list_peers(&self) -> RpcResult<Vec<Vec<GossipPeer>>> {
        let groups: Vec<Vec<GossipPeer>> = self.get_json("/network/peers")?;
        tracing::debug!(
            "decoded {} peers in {} groups",
            groups.iter().map(Vec::len).sum::<usize>(),
            groups.len()
        );
        Ok(groups)
    }

    /// `GET /network/peers/<peer_id>`
    ///
    /// Numbers may arrive quoted or bare. When the body does not name the
    /// peer, `peer_id` is filled in as its public key hash.
    pub fn get_peer(&self, peer_id: &str) -> RpcResult<GossipPeerDetails> {
        let mut peer: GossipPeerDetails = self.get_json(&format!("/network/peers/{}", peer_id))?;
        if peer.public_key_hash.is_none() {
            peer.public_key_hash = Some(peer_id.to_string());
        }
        Ok(peer)
    }
}

//! Node network RPC response models
//!
//! Fields missing from a response keep their zero value. A field that is
//! present with the wrong JSON type fails the decode.

use crate::codec::lenient;
use serde::{Deserialize, Serialize};

/// Point a connection or peer is reachable at
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Point {
    pub addr: String,
    pub port: i64,
}

/// Connection metadata exchanged during the handshake
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConnMetadata {
    pub disable_mempool: bool,
    pub private_node: bool,
}

/// Protocol version supported by a connected peer
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkVersion {
    pub name: String,
    pub major: i64,
    pub minor: i64,
}

/// One active peer connection, `GET /network/connections`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionInfo {
    pub incoming: bool,
    pub peer_id: String,
    pub id_point: Point,
    pub remote_socket_port: i64,
    pub versions: Vec<NetworkVersion>,
    pub private: bool,
    pub local_metadata: ConnMetadata,
    pub remote_metadata: ConnMetadata,
}

/// Traffic counters of a gossip peer
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PeerStat {
    pub total_sent: i64,
    pub total_recv: i64,
    pub current_inflow: i64,
    pub current_outflow: i64,
}

/// Where and when a peer event (failure, rejection, ...) last happened
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PeerEvent {
    pub addr: String,
    pub port: i64,
    #[serde(alias = "Timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Entry of the gossip table, `GET /network/peers`
///
/// Numbers must be native JSON numbers here.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GossipPeer {
    #[serde(alias = "PublicKeyHash", skip_serializing_if = "Option::is_none")]
    pub public_key_hash: Option<String>,
    pub score: i64,
    pub trusted: bool,
    pub conn_metadata: ConnMetadata,
    pub state: String,
    pub reachable_at: Point,
    pub stat: PeerStat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failed_connection: Option<PeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_rejected_connection: Option<PeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_established_connection: Option<PeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_disconnection: Option<PeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<PeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_miss: Option<PeerEvent>,
}

/// [`Point`] whose port may be quoted
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LenientPoint {
    pub addr: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub port: i64,
}

/// [`PeerEvent`] whose port and timestamp may be quoted
///
/// A quoted empty port decodes to `0`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LenientPeerEvent {
    pub addr: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub port: i64,
    #[serde(
        alias = "Timestamp",
        deserialize_with = "lenient::opt_i64_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
}

/// Traffic counters as the single-peer endpoint reports them
///
/// Totals can exceed what the node is willing to print as a JSON number and
/// are kept as decimal strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PeerTraffic {
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub total_sent: String,
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub total_recv: String,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub current_inflow: i64,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub current_outflow: i64,
}

/// One gossip peer, `GET /network/peers/<peer_id>`
///
/// Same entity as [`GossipPeer`], but this endpoint quotes some numbers and
/// reports rejected connections as a list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GossipPeerDetails {
    #[serde(alias = "PublicKeyHash", skip_serializing_if = "Option::is_none")]
    pub public_key_hash: Option<String>,
    #[serde(deserialize_with = "lenient::i64_or_string")]
    pub score: i64,
    pub trusted: bool,
    pub conn_metadata: ConnMetadata,
    pub state: String,
    pub reachable_at: LenientPoint,
    pub stat: PeerTraffic,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failed_connection: Option<LenientPeerEvent>,
    #[serde(
        deserialize_with = "lenient::vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub last_rejected_connection: Vec<LenientPeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_established_connection: Option<LenientPeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_disconnection: Option<LenientPeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<LenientPeerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_miss: Option<LenientPeerEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTION: &str = r#"{
        "incoming": true,
        "peer_id": "idrpUzAQaVaXkmNCDzViQ3gJx8Kr8A",
        "id_point": {"addr": "::ffff:10.0.0.7", "port": 9732},
        "remote_socket_port": 9732,
        "versions": [{"name": "TEZOS_MAINNET", "major": 0, "minor": 1}],
        "private": false,
        "local_metadata": {"disable_mempool": false, "private_node": false},
        "remote_metadata": {"disable_mempool": true, "private_node": false}
    }"#;

    #[test]
    fn test_connection_info() {
        let conn: ConnectionInfo = serde_json::from_str(CONNECTION).unwrap();
        assert!(conn.incoming);
        assert_eq!(conn.peer_id, "idrpUzAQaVaXkmNCDzViQ3gJx8Kr8A");
        assert_eq!(conn.id_point.addr, "::ffff:10.0.0.7");
        assert_eq!(conn.id_point.port, 9732);
        assert_eq!(conn.versions.len(), 1);
        assert_eq!(conn.versions[0].name, "TEZOS_MAINNET");
        assert_eq!(conn.versions[0].minor, 1);
        assert!(conn.remote_metadata.disable_mempool);
        assert!(!conn.local_metadata.disable_mempool);
    }

    #[test]
    fn test_connection_info_missing_fields_default() {
        let conn: ConnectionInfo = serde_json::from_str(r#"{"peer_id": "idsX"}"#).unwrap();
        assert_eq!(conn.peer_id, "idsX");
        assert_eq!(conn.id_point, Point::default());
        assert!(conn.versions.is_empty());
    }

    #[test]
    fn test_connection_info_wrong_type() {
        assert!(serde_json::from_str::<ConnectionInfo>(r#"{"incoming": "yes"}"#).is_err());
    }

    #[test]
    fn test_gossip_peer_events_only_when_present() {
        let peer: GossipPeer = serde_json::from_str(
            r#"{
                "score": 10,
                "trusted": true,
                "state": "running",
                "reachable_at": {"addr": "::ffff:10.0.0.8", "port": 9732},
                "stat": {"total_sent": 100, "total_recv": 200, "current_inflow": 3, "current_outflow": 4},
                "last_seen": {"addr": "::ffff:10.0.0.8", "port": 9732, "timestamp": 1600000000}
            }"#,
        )
        .unwrap();
        assert_eq!(peer.score, 10);
        assert_eq!(peer.stat.total_recv, 200);
        assert_eq!(peer.last_seen.as_ref().and_then(|e| e.timestamp), Some(1600000000));
        assert!(peer.last_miss.is_none());
        assert!(peer.last_failed_connection.is_none());
        assert!(peer.public_key_hash.is_none());
    }

    #[test]
    fn test_gossip_peer_rejects_quoted_numbers() {
        assert!(serde_json::from_str::<GossipPeer>(r#"{"score": "10"}"#).is_err());
    }

    #[test]
    fn test_gossip_peer_details_quoted_numbers() {
        let peer: GossipPeerDetails = serde_json::from_str(
            r#"{
                "score": "42",
                "trusted": false,
                "conn_metadata": {"disable_mempool": false, "private_node": true},
                "state": "disconnected",
                "reachable_at": {"addr": "::ffff:10.0.0.9", "port": "9732"},
                "stat": {"total_sent": 1024, "total_recv": "2048", "current_inflow": "5", "current_outflow": 6},
                "last_failed_connection": {"addr": "::ffff:10.0.0.9", "port": "9732", "timestamp": "17"},
                "last_rejected_connection": [{"addr": "::ffff:10.0.0.9", "port": 9733}]
            }"#,
        )
        .unwrap();
        assert_eq!(peer.score, 42);
        assert!(peer.conn_metadata.private_node);
        assert_eq!(peer.reachable_at.port, 9732);
        assert_eq!(peer.stat.total_sent, "1024");
        assert_eq!(peer.stat.total_recv, "2048");
        assert_eq!(peer.stat.current_inflow, 5);
        assert_eq!(peer.stat.current_outflow, 6);
        let failed = peer.last_failed_connection.unwrap();
        assert_eq!(failed.port, 9732);
        assert_eq!(failed.timestamp, Some(17));
        assert_eq!(peer.last_rejected_connection.len(), 1);
        assert_eq!(peer.last_rejected_connection[0].port, 9733);
        assert_eq!(peer.last_rejected_connection[0].timestamp, None);
    }

    #[test]
    fn test_gossip_peer_details_null_list_and_empty_port() {
        let peer: GossipPeerDetails = serde_json::from_str(
            r#"{
                "score": 1,
                "last_failed_connection": {"addr": "::ffff:10.0.0.9", "port": "", "timestamp": ""},
                "last_rejected_connection": null
            }"#,
        )
        .unwrap();
        assert!(peer.last_rejected_connection.is_empty());
        let failed = peer.last_failed_connection.unwrap();
        assert_eq!(failed.addr, "::ffff:10.0.0.9");
        assert_eq!(failed.port, 0);
        assert_eq!(failed.timestamp, None);
    }

    #[test]
    fn test_skipped_fields_are_not_serialized() {
        let json = serde_json::to_value(GossipPeer::default()).unwrap();
        assert!(json.get("last_seen").is_none());
        assert!(json.get("public_key_hash").is_none());
        assert_eq!(json["score"], 0);
    }
}

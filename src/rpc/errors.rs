//! Network RPC errors
//!
//! Every failure a `NetworkRpc` call can hit is surfaced as an [`RpcError`].
//! Nothing is retried or recovered locally; the caller decides.

use std::fmt;
use std::fmt::Display;
use std::io;
use std::time::Duration;

/// Result alias used by every `NetworkRpc` call
pub type RpcResult<T> = std::result::Result<T, RpcError>;

/// Status line every void-style call must observe
pub const STATUS_OK: &str = "200 OK";

/// Network RPC errors
#[derive(Debug)]
pub enum RpcError {
    /// The request could not be sent or the connection failed
    ///
    /// Propagated as-is from the HTTP agent: DNS failures, refused
    /// connections, timeouts while waiting for the response head.
    Transport(Box<ureq::Transport>),

    /// The node answered with a status line other than `200 OK`
    ///
    /// Carries the observed status line, e.g. `404 Not Found`.
    Status(String),

    /// The response body could not be read
    Io(io::Error),

    /// The body was not valid JSON or did not match the expected shape
    Decode(serde_json::Error),

    /// The network log did not start with an opening `{`
    ExpectedObject,

    /// The network log stream ran into its deadline
    Deadline(Duration),
}

impl std::error::Error for RpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RpcError::Transport(e) => Some(&**e),
            RpcError::Io(e) => Some(e),
            RpcError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for RpcError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RpcError::Transport(e) => write!(fmt, "transport error: {}", e),
            RpcError::Status(status) => {
                write!(fmt, "expected status '{}' got '{}'", STATUS_OK, status)
            }
            RpcError::Io(e) => write!(fmt, "read body failed: {}", e),
            RpcError::Decode(e) => write!(fmt, "decode body failed: {}", e),
            RpcError::ExpectedObject => "expected object".fmt(fmt),
            RpcError::Deadline(d) => write!(fmt, "stream deadline of {:?} reached", d),
        }
    }
}

impl From<ureq::Error> for RpcError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, resp) => {
                RpcError::Status(format!("{} {}", code, resp.status_text()))
            }
            ureq::Error::Transport(t) => RpcError::Transport(Box::new(t)),
        }
    }
}

impl From<io::Error> for RpcError {
    fn from(err: io::Error) -> Self {
        RpcError::Io(err)
    }
}

impl From<serde_json::Error> for RpcError {
    /// Read failures that happened under the decoder are reported as I/O
    /// errors, everything else is a decode error.
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            RpcError::Io(err.into())
        } else {
            RpcError::Decode(err)
        }
    }
}

/// A bulk removal that stopped at its first failure
///
/// `removed` holds, in request order, the peers whose removal was confirmed
/// before `peer_id` failed. Peers after `peer_id` were never attempted.
#[derive(Debug)]
pub struct PartialRemoval {
    pub removed: Vec<String>,
    pub peer_id: String,
    pub error: RpcError,
}

impl std::error::Error for PartialRemoval {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for PartialRemoval {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "remove peer {} failed after {} removal(s): {}",
            self.peer_id,
            self.removed.len(),
            self.error
        )
    }
}

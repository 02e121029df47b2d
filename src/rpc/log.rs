//! Streaming decoder for `GET /network/log`
//!
//! The node serves the log as one JSON object that never ends on its own:
//! every member is an event, appended as it happens. Members are decoded and
//! handed to the caller one at a time, and the whole stream is bounded by a
//! deadline checked on every read.

use super::{NetworkRpc, RpcError, RpcResult};
use serde::Deserializer as _;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::time::{Duration, Instant};

impl NetworkRpc {
    /// `GET /network/log`, for at most `max_duration`
    ///
    /// Each log entry is passed to `sink` as soon as it is decoded. Returns
    /// the number of entries if the node closes the object itself, and
    /// [`RpcError::Deadline`] once `max_duration` has elapsed. Entries seen
    /// before an error have already been emitted.
    pub fn stream_network_log<F>(&self, max_duration: Duration, sink: F) -> RpcResult<usize>
    where
        F: FnMut(Value),
    {
        let url = self.endpoint("/network/log");
        tracing::debug!("GET {} for at most {:?}", url, max_duration);
        // a duration past what Instant can represent means no deadline at all
        let deadline = Instant::now().checked_add(max_duration);

        let mut request = self.agent.get(&url);
        if deadline.is_some() {
            // the request timeout bounds each blocking read on the socket
            request = request.timeout(max_duration);
        }
        let resp = request.call()?;
        let body = Deadline::new(resp.into_reader(), deadline);

        match decode_log(body, sink) {
            Ok(count) => {
                tracing::debug!("network log closed after {} entries", count);
                Ok(count)
            }
            // the body reader may rewrap the socket timeout, so a read error
            // past the deadline counts as the deadline too
            Err(RpcError::Io(e)) if is_timeout(&e) || expired(deadline) => {
                tracing::debug!("network log cut at deadline: {}", e);
                Err(RpcError::Deadline(max_duration))
            }
            Err(e) => Err(e),
        }
    }
}

fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// Reader that fails with `TimedOut` once `deadline` has passed
///
/// Only checked when a read starts, so the inner reader needs its own read
/// timeout to unblock a read that waits on an idle peer. `None` never expires.
pub struct Deadline<R> {
    inner: R,
    deadline: Option<Instant>,
}

impl<R> Deadline<R> {
    pub fn new(inner: R, deadline: Option<Instant>) -> Self {
        Self { inner, deadline }
    }
}

impl<R: Read> Read for Deadline<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if expired(self.deadline) {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "deadline reached"));
        }
        self.inner.read(buf)
    }
}

/// Decode a log object from `reader`, emitting every member value to `sink`
///
/// Member names are discarded. Returns the number of emitted entries once
/// the closing `}` is read.
pub fn decode_log<R, F>(reader: R, mut sink: F) -> RpcResult<usize>
where
    R: Read,
    F: FnMut(Value),
{
    let mut reader = BufReader::new(reader);
    expect_object(&mut reader)?;

    let mut de = serde_json::Deserializer::from_reader(reader);
    let count = (&mut de).deserialize_map(LogVisitor { sink: &mut sink })?;
    Ok(count)
}

/// Skip leading whitespace and make sure an object starts, without consuming it
fn expect_object<R: BufRead>(reader: &mut R) -> RpcResult<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(pos) => {
                let first = buf[pos];
                reader.consume(pos);
                if first != b'{' {
                    return Err(RpcError::ExpectedObject);
                }
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

struct LogVisitor<'a, F> {
    sink: &'a mut F,
}

impl<'de, F> Visitor<'de> for LogVisitor<'_, F>
where
    F: FnMut(Value),
{
    type Value = usize;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a network log object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<usize, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut count = 0;
        while map.next_key::<IgnoredAny>()?.is_some() {
            let entry: Value = map.next_value()?;
            (self.sink)(entry);
            count += 1;
        }
        Ok(count)
    }
}

//! Decoding helpers for node responses
//!
//! The node is not consistent about how it encodes numbers: the same
//! counter may arrive as `42` from one endpoint and `"42"` from another.
//! The helpers in [`lenient`] are meant for `#[serde(deserialize_with)]`
//! on the fields known to flip between the two.

pub mod lenient;

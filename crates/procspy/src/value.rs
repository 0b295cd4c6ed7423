// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Argument values accepted by the write and log sinks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Payload handed to a write sink: text or raw bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum WriteData {
    Text(String),
    Bytes(Vec<u8>),
}

impl WriteData {
    /// Text payload, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WriteData::Text(s) => Some(s),
            WriteData::Bytes(_) => None,
        }
    }

    /// Byte payload, if this is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            WriteData::Text(_) => None,
            WriteData::Bytes(b) => Some(b),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            WriteData::Text(s) => s.is_empty(),
            WriteData::Bytes(b) => b.is_empty(),
        }
    }

    /// Convert to the bytes that would reach the stream.
    ///
    /// `encoding` only applies to text; byte payloads pass through as-is.
    pub fn encode(&self, encoding: Option<&str>) -> io::Result<Cow<'_, [u8]>> {
        let text = match self {
            WriteData::Bytes(b) => return Ok(Cow::Borrowed(b)),
            WriteData::Text(s) => s,
        };

        match encoding.map(|e| e.to_ascii_lowercase()).as_deref() {
            None | Some("utf8") | Some("utf-8") => Ok(Cow::Borrowed(text.as_bytes())),
            Some("hex") => hex::decode(text)
                .map(Cow::Owned)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
            // Low byte of each code point
            Some("latin1") | Some("binary") => {
                Ok(Cow::Owned(text.chars().map(|c| c as u32 as u8).collect()))
            }
            Some(other) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown encoding: {}", other),
            )),
        }
    }
}

impl From<&str> for WriteData {
    fn from(s: &str) -> Self {
        WriteData::Text(s.to_string())
    }
}

impl From<String> for WriteData {
    fn from(s: String) -> Self {
        WriteData::Text(s)
    }
}

impl From<&[u8]> for WriteData {
    fn from(b: &[u8]) -> Self {
        WriteData::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for WriteData {
    fn from(b: Vec<u8>) -> Self {
        WriteData::Bytes(b)
    }
}

type CallbackFn = dyn Fn(Option<&io::Error>) + Send + Sync;

/// Completion callback passed alongside a write.
///
/// Clones share the closure. Equality is identity: two callbacks are equal only
/// when they wrap the same closure, so a recorded callback can be matched
/// against the one the test handed in.
#[derive(Clone)]
pub struct WriteCallback(Arc<CallbackFn>);

impl WriteCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&io::Error>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke with the outcome of the write (`None` on success).
    pub fn call(&self, error: Option<&io::Error>) {
        (self.0)(error)
    }
}

impl PartialEq for WriteCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for WriteCallback {}

impl fmt::Debug for WriteCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriteCallback({:p})", Arc::as_ptr(&self.0))
    }
}

/// Convert any serializable value into a recorded log argument.
///
/// Values serde cannot represent are recorded as a placeholder string rather
/// than dropped, so argument positions stay stable.
pub fn to_log_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| Value::String(format!("<unserializable: {}>", e)))
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded call data types.

use crate::duration_serde;
use crate::value::{WriteCallback, WriteData};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::time::{Duration, SystemTime};

/// One recorded invocation of a stand-in.
#[derive(Clone, Debug, Serialize)]
pub struct Invocation<A, R> {
    /// Position in the history since creation or last clear
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since the stand-in was created
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,

    /// Arguments the caller passed
    pub args: A,

    /// Value reported back to the caller
    pub returned: R,
}

/// Arguments of a process-exit call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ExitCall {
    pub code: i32,
}

impl ExitCall {
    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Arguments of a stream write: `(data, encoding?, callback?)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteCall {
    pub data: WriteData,
    pub encoding: Option<String>,
    pub callback: Option<WriteCallback>,
}

impl WriteCall {
    pub fn new(data: impl Into<WriteData>) -> Self {
        Self {
            data: data.into(),
            encoding: None,
            callback: None,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_callback(mut self, callback: WriteCallback) -> Self {
        self.callback = Some(callback);
        self
    }
}

// Callbacks are closures; export only whether one was passed.
impl Serialize for WriteCall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            data: &'a WriteData,
            #[serde(skip_serializing_if = "Option::is_none")]
            encoding: Option<&'a str>,
            has_callback: bool,
        }

        Repr {
            data: &self.data,
            encoding: self.encoding.as_deref(),
            has_callback: self.callback.is_some(),
        }
        .serialize(serializer)
    }
}

/// Arguments of a log call: the message (if any) followed by extra parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogCall(pub Vec<Value>);

impl LogCall {
    pub fn new(args: Vec<Value>) -> Self {
        Self(args)
    }

    /// The primary message, absent for an argument-less call.
    pub fn message(&self) -> Option<&Value> {
        self.0.first()
    }

    /// Everything after the primary message.
    pub fn params(&self) -> &[Value] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn args(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for LogCall {
    fn from(args: Vec<Value>) -> Self {
        Self(args)
    }
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;

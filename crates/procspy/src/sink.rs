// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sink traits for the interceptable targets, with real and recording
//! implementations.
//!
//! Code that wants its console output or exit status to be observable in
//! tests takes these traits (or a [`Process`](crate::Process)) instead of
//! calling `println!` or `std::process::exit` directly.

use crate::call::{ExitCall, LogCall, WriteCall};
use crate::spy::{ExitSpy, LogSpy, WriteSpy};
use crate::value::{WriteCallback, WriteData};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;

/// Process termination entry point.
pub trait ExitSink: Send + Sync {
    fn exit(&self, code: i32);
}

/// Stream write entry point: `(data, encoding?, callback?) -> success`.
pub trait WriteSink: Send + Sync {
    fn write(
        &self,
        data: WriteData,
        encoding: Option<&str>,
        callback: Option<WriteCallback>,
    ) -> bool;

    fn write_str(&self, s: &str) -> bool {
        self.write(WriteData::from(s), None, None)
    }

    fn write_bytes(&self, bytes: &[u8]) -> bool {
        self.write(WriteData::from(bytes), None, None)
    }

    fn write_with_callback(&self, data: WriteData, callback: WriteCallback) -> bool {
        self.write(data, None, Some(callback))
    }
}

/// Logging entry point taking a variadic argument list.
pub trait LogSink: Send + Sync {
    fn log(&self, args: Vec<Value>);
}

impl<T: ExitSink + ?Sized> ExitSink for Arc<T> {
    fn exit(&self, code: i32) {
        (**self).exit(code)
    }
}

impl<T: WriteSink + ?Sized> WriteSink for Arc<T> {
    fn write(
        &self,
        data: WriteData,
        encoding: Option<&str>,
        callback: Option<WriteCallback>,
    ) -> bool {
        (**self).write(data, encoding, callback)
    }
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, args: Vec<Value>) {
        (**self).log(args)
    }
}

/// Log through a sink, converting each argument with `serde_json`.
///
/// Works with anything exposing `log(Vec<Value>)`: a [`LogSink`], an
/// `Arc<dyn LogSink>`, or a [`Process`](crate::Process).
///
/// ```
/// use procspy::{console_log, RecordingLog, Spy, Target};
///
/// let spy = Spy::new(Target::Log);
/// let log = RecordingLog::new(spy.clone());
/// console_log!(log, "answer:", 42);
/// assert_eq!(spy.call_count(), 1);
/// ```
#[macro_export]
macro_rules! console_log {
    ($sink:expr $(, $arg:expr)* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::LogSink as _;
            $sink.log(vec![$($crate::to_log_value(&$arg)),*])
        }
    };
}

// =============================================================================
// Real implementations
// =============================================================================

/// Terminates the current process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessExit;

impl ExitSink for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Which standard stream a [`StdStream`] writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes to the real standard output or error stream.
#[derive(Clone, Copy, Debug)]
pub struct StdStream {
    stream: Stream,
}

impl StdStream {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(bytes)?;
                err.flush()
            }
        }
    }
}

impl WriteSink for StdStream {
    fn write(
        &self,
        data: WriteData,
        encoding: Option<&str>,
        callback: Option<WriteCallback>,
    ) -> bool {
        let result = data
            .encode(encoding)
            .and_then(|bytes| self.write_all(&bytes));
        if let Some(cb) = callback {
            cb.call(result.as_ref().err());
        }
        result.is_ok()
    }
}

/// Console-style logger writing formatted lines through a [`WriteSink`].
pub struct ConsoleLog<W> {
    out: W,
}

impl<W: WriteSink> ConsoleLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl ConsoleLog<StdStream> {
    /// Logger writing to the real standard output.
    pub fn stdout() -> Self {
        Self::new(StdStream::stdout())
    }
}

impl<W: WriteSink> LogSink for ConsoleLog<W> {
    fn log(&self, args: Vec<Value>) {
        self.out.write(WriteData::Text(format_line(&args)), None, None);
    }
}

/// Render log arguments as one newline-terminated line.
///
/// Strings are written verbatim, every other value as compact JSON, separated
/// by single spaces.
pub fn format_line(args: &[Value]) -> String {
    let mut line = args
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}

// =============================================================================
// Recording implementations
// =============================================================================

/// Exit stand-in: records the code and returns instead of terminating.
#[derive(Clone, Debug)]
pub struct RecordingExit {
    spy: ExitSpy,
}

impl RecordingExit {
    pub fn new(spy: ExitSpy) -> Self {
        Self { spy }
    }

    pub fn spy(&self) -> &ExitSpy {
        &self.spy
    }
}

impl ExitSink for RecordingExit {
    fn exit(&self, code: i32) {
        self.spy.record(ExitCall::new(code), ());
    }
}

/// Write stand-in: records the full argument list and reports success.
///
/// The callback is recorded, not invoked.
#[derive(Clone, Debug)]
pub struct RecordingWrite {
    spy: WriteSpy,
}

impl RecordingWrite {
    pub fn new(spy: WriteSpy) -> Self {
        Self { spy }
    }

    pub fn spy(&self) -> &WriteSpy {
        &self.spy
    }
}

impl WriteSink for RecordingWrite {
    fn write(
        &self,
        data: WriteData,
        encoding: Option<&str>,
        callback: Option<WriteCallback>,
    ) -> bool {
        let call = WriteCall {
            data,
            encoding: encoding.map(str::to_string),
            callback,
        };
        self.spy.record(call, true);
        true
    }
}

/// Log stand-in: records the argument list and prints nothing.
#[derive(Clone, Debug)]
pub struct RecordingLog {
    spy: LogSpy,
}

impl RecordingLog {
    pub fn new(spy: LogSpy) -> Self {
        Self { spy }
    }

    pub fn spy(&self) -> &LogSpy {
        &self.spy
    }
}

impl LogSink for RecordingLog {
    fn log(&self, args: Vec<Value>) {
        self.spy.record(LogCall::new(args), ());
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recording stand-ins for process exit, standard output, standard error and
//! console logging.
//!
//! Code under test talks to its console through the sink traits, either via an
//! injected [`Process`] or the process-wide one from [`process()`]. A test
//! swaps a sink for a recording stand-in, drives the code, then asserts on the
//! returned [`Spy`]:
//!
//! ```
//! use procspy::{Process, WriteCall, WriteSink};
//!
//! let process = Process::new();
//! let stdout = process.mock_stdout()?;
//!
//! assert!(process.stdout().write_str("Hello, world!"));
//! assert_eq!(stdout.call_count(), 1);
//! assert!(stdout.was_called_with(&WriteCall::new("Hello, world!")));
//! assert!(stdout.returned_with(&true));
//!
//! stdout.restore();
//! # Ok::<(), procspy::InterceptError>(())
//! ```

mod call;
mod duration_serde;
mod env;
mod error;
mod global;
mod process;
mod sink;
mod spy;
mod value;

pub use call::{ExitCall, Invocation, LogCall, WriteCall};
pub use error::InterceptError;
pub use global::{
    console_log, exit, mock_console_log, mock_process_exit, mock_process_stderr,
    mock_process_stdout, process, restore_all_mocks, stderr, stdout,
};
pub use process::{InstallPolicy, Process, ProcessBuilder, Target};
pub use sink::{
    format_line, ConsoleLog, ExitSink, LogSink, ProcessExit, RecordingExit, RecordingLog,
    RecordingWrite, StdStream, Stream, WriteSink,
};
pub use spy::{ExitSpy, LogSpy, Spy, WriteSpy};
pub use value::{to_log_value, WriteCallback, WriteData};

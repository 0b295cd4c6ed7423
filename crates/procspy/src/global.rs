// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The process-wide [`Process`] and free-function entry points over it.
//!
//! Tests sharing this instance run on multiple harness threads; serialize them
//! and call [`restore_all_mocks`] in cleanup so interception never leaks into
//! the next test.

use crate::env;
use crate::error::InterceptError;
use crate::process::{InstallPolicy, Process};
use crate::sink::WriteSink;
use crate::spy::{ExitSpy, LogSpy, WriteSpy};
use serde_json::Value;
use std::sync::{Arc, LazyLock};

static PROCESS: LazyLock<Process> = LazyLock::new(|| Process::with_policy(configured_policy()));

pub(crate) fn configured_policy() -> InstallPolicy {
    let Some(raw) = env::install_policy() else {
        return InstallPolicy::default();
    };
    raw.parse().unwrap_or_else(|e: InterceptError| {
        tracing::warn!(error = %e, "ignoring {}", env::PROCSPY_INSTALL_POLICY);
        InstallPolicy::default()
    })
}

/// The process-wide registry backed by the real sinks.
pub fn process() -> &'static Process {
    &PROCESS
}

/// Intercept process termination on the process-wide registry.
pub fn mock_process_exit() -> Result<ExitSpy, InterceptError> {
    process().mock_exit()
}

/// Intercept writes to standard output on the process-wide registry.
pub fn mock_process_stdout() -> Result<WriteSpy, InterceptError> {
    process().mock_stdout()
}

/// Intercept writes to standard error on the process-wide registry.
pub fn mock_process_stderr() -> Result<WriteSpy, InterceptError> {
    process().mock_stderr()
}

/// Intercept logging on the process-wide registry.
pub fn mock_console_log() -> Result<LogSpy, InterceptError> {
    process().mock_log()
}

/// Restore every stand-in active on the process-wide registry.
pub fn restore_all_mocks() {
    process().restore_all();
}

/// Exit through the process-wide exit slot.
pub fn exit(code: i32) {
    process().exit(code);
}

/// Handle to the process-wide standard output slot.
pub fn stdout() -> Arc<dyn WriteSink> {
    process().stdout()
}

/// Handle to the process-wide standard error slot.
pub fn stderr() -> Arc<dyn WriteSink> {
    process().stderr()
}

/// Log through the process-wide log slot. See also [`console_log!`](crate::console_log!).
pub fn console_log(args: Vec<Value>) {
    process().log(args);
}

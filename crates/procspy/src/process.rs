// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of the four interceptable process sinks.

use crate::call::{ExitCall, LogCall, WriteCall};
use crate::error::InterceptError;
use crate::sink::{
    ConsoleLog, ExitSink, LogSink, ProcessExit, RecordingExit, RecordingLog, RecordingWrite,
    StdStream, WriteSink,
};
use crate::spy::{ExitSpy, LogSpy, Spy, WriteSpy};
use crate::value::{WriteCallback, WriteData};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

/// One of the process-wide sinks a stand-in can replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Exit,
    Stdout,
    Stderr,
    Log,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::Exit, Target::Stdout, Target::Stderr, Target::Log];
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Exit => "exit",
            Target::Stdout => "stdout",
            Target::Stderr => "stderr",
            Target::Log => "log",
        };
        f.write_str(name)
    }
}

/// What to do when a stand-in is requested for an already intercepted target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstallPolicy {
    /// Refuse with [`InterceptError::AlreadyIntercepted`].
    #[default]
    FailFast,
    /// Hand back the active stand-in, history included.
    Reuse,
}

impl FromStr for InstallPolicy {
    type Err = InterceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(InstallPolicy::FailFast),
            "reuse" => Ok(InstallPolicy::Reuse),
            _ => Err(InterceptError::UnknownPolicy(s.to_string())),
        }
    }
}

struct SlotState<S: ?Sized, A, R> {
    live: Arc<S>,
    interceptor: Option<Spy<A, R>>,
}

type SharedState<S, A, R> = Arc<Mutex<SlotState<S, A, R>>>;

/// The live implementation of one target, plus its active stand-in if any.
struct Slot<S: ?Sized, A, R> {
    target: Target,
    state: SharedState<S, A, R>,
}

impl<S, A, R> Slot<S, A, R>
where
    S: ?Sized + Send + Sync + 'static,
    A: Send + 'static,
    R: Send + 'static,
{
    fn new(target: Target, live: Arc<S>) -> Self {
        Self {
            target,
            state: Arc::new(Mutex::new(SlotState {
                live,
                interceptor: None,
            })),
        }
    }

    fn live(&self) -> Arc<S> {
        Arc::clone(&self.state.lock().live)
    }

    fn is_intercepted(&self) -> bool {
        self.state.lock().interceptor.is_some()
    }

    fn interceptor(&self) -> Option<Spy<A, R>> {
        self.state.lock().interceptor.clone()
    }

    fn route(&self) -> Route<S, A, R> {
        Route {
            state: Arc::clone(&self.state),
        }
    }

    /// Replace the live implementation with a recording stand-in built by
    /// `stand_in`.
    fn intercept<F>(&self, policy: InstallPolicy, stand_in: F) -> Result<Spy<A, R>, InterceptError>
    where
        F: FnOnce(Spy<A, R>) -> Arc<S>,
    {
        let mut state = self.state.lock();
        if let Some(existing) = &state.interceptor {
            return match policy {
                InstallPolicy::FailFast => Err(InterceptError::AlreadyIntercepted(self.target)),
                InstallPolicy::Reuse => {
                    tracing::debug!(target_sink = %self.target, spy = existing.id(), "reusing active stand-in");
                    Ok(existing.clone())
                }
            };
        }

        let spy = Spy::new(self.target);
        let original = Arc::clone(&state.live);
        let weak: Weak<Mutex<SlotState<S, A, R>>> = Arc::downgrade(&self.state);
        let spy_id = spy.id();
        spy.on_restore(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.lock();
            if state.interceptor.as_ref().map(Spy::id) == Some(spy_id) {
                state.live = original;
                state.interceptor = None;
            }
        }));

        state.live = stand_in(spy.clone());
        state.interceptor = Some(spy.clone());
        tracing::debug!(target_sink = %self.target, spy = spy_id, "stand-in installed");
        Ok(spy)
    }
}

/// Handle to a slot that dispatches each call to whatever is live at that
/// moment, so holders follow later installs and restores.
struct Route<S: ?Sized, A, R> {
    state: SharedState<S, A, R>,
}

impl<S: ?Sized, A, R> Route<S, A, R> {
    // Release the slot before running the sink.
    fn live(&self) -> Arc<S> {
        Arc::clone(&self.state.lock().live)
    }
}

impl ExitSink for Route<dyn ExitSink, ExitCall, ()> {
    fn exit(&self, code: i32) {
        self.live().exit(code);
    }
}

impl WriteSink for Route<dyn WriteSink, WriteCall, bool> {
    fn write(
        &self,
        data: WriteData,
        encoding: Option<&str>,
        callback: Option<WriteCallback>,
    ) -> bool {
        self.live().write(data, encoding, callback)
    }
}

impl LogSink for Route<dyn LogSink, LogCall, ()> {
    fn log(&self, args: Vec<Value>) {
        self.live().log(args);
    }
}

/// Registry of the exit, stdout, stderr and log slots.
///
/// Code under test routes through a `Process` ([`exit`](Process::exit),
/// [`stdout`](Process::stdout), [`stderr`](Process::stderr),
/// [`log`](Process::log)); tests install recording stand-ins with the
/// `mock_*` methods and inspect them through the returned [`Spy`].
pub struct Process {
    policy: InstallPolicy,
    exit: Slot<dyn ExitSink, ExitCall, ()>,
    stdout: Slot<dyn WriteSink, WriteCall, bool>,
    stderr: Slot<dyn WriteSink, WriteCall, bool>,
    log: Slot<dyn LogSink, LogCall, ()>,
}

impl Process {
    /// A process backed by the real sinks.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_policy(policy: InstallPolicy) -> Self {
        Self::builder().policy(policy).build()
    }

    pub fn builder() -> ProcessBuilder {
        ProcessBuilder::default()
    }

    pub fn policy(&self) -> InstallPolicy {
        self.policy
    }

    /// Intercept process termination.
    pub fn mock_exit(&self) -> Result<ExitSpy, InterceptError> {
        self.exit.intercept(self.policy, |spy| {
            Arc::new(RecordingExit::new(spy)) as Arc<dyn ExitSink>
        })
    }

    /// Intercept writes to standard output.
    pub fn mock_stdout(&self) -> Result<WriteSpy, InterceptError> {
        self.stdout.intercept(self.policy, |spy| {
            Arc::new(RecordingWrite::new(spy)) as Arc<dyn WriteSink>
        })
    }

    /// Intercept writes to standard error.
    pub fn mock_stderr(&self) -> Result<WriteSpy, InterceptError> {
        self.stderr.intercept(self.policy, |spy| {
            Arc::new(RecordingWrite::new(spy)) as Arc<dyn WriteSink>
        })
    }

    /// Intercept logging.
    pub fn mock_log(&self) -> Result<LogSpy, InterceptError> {
        self.log.intercept(self.policy, |spy| {
            Arc::new(RecordingLog::new(spy)) as Arc<dyn LogSink>
        })
    }

    pub fn is_intercepted(&self, target: Target) -> bool {
        match target {
            Target::Exit => self.exit.is_intercepted(),
            Target::Stdout => self.stdout.is_intercepted(),
            Target::Stderr => self.stderr.is_intercepted(),
            Target::Log => self.log.is_intercepted(),
        }
    }

    /// Restore every active stand-in. Targets left alone are untouched.
    pub fn restore_all(&self) {
        if let Some(spy) = self.exit.interceptor() {
            spy.restore();
        }
        if let Some(spy) = self.stdout.interceptor() {
            spy.restore();
        }
        if let Some(spy) = self.stderr.interceptor() {
            spy.restore();
        }
        if let Some(spy) = self.log.interceptor() {
            spy.restore();
        }
    }

    /// Terminate through the live exit sink.
    pub fn exit(&self, code: i32) {
        self.exit.live().exit(code);
    }

    /// Handle to the standard output slot.
    ///
    /// Every write goes to the sink live at the time of the write, so a handle
    /// fetched before `mock_stdout` is intercepted and one fetched while a
    /// stand-in was active reaches the original again after `restore`.
    pub fn stdout(&self) -> Arc<dyn WriteSink> {
        Arc::new(self.stdout.route())
    }

    /// Handle to the standard error slot. See [`stdout`](Process::stdout).
    pub fn stderr(&self) -> Arc<dyn WriteSink> {
        Arc::new(self.stderr.route())
    }

    /// Handle to the exit slot, following installs and restores.
    pub fn exit_sink(&self) -> Arc<dyn ExitSink> {
        Arc::new(self.exit.route())
    }

    /// Handle to the log slot, following installs and restores.
    pub fn log_sink(&self) -> Arc<dyn LogSink> {
        Arc::new(self.log.route())
    }

    /// Log through the live log sink.
    pub fn log(&self, args: Vec<Value>) {
        self.log.live().log(args);
    }
}

impl Default for Process {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let intercepted: Vec<Target> = Target::ALL
            .into_iter()
            .filter(|t| self.is_intercepted(*t))
            .collect();
        f.debug_struct("Process")
            .field("policy", &self.policy)
            .field("intercepted", &intercepted)
            .finish()
    }
}

/// Builder for a [`Process`] with injected original sinks.
///
/// Unset sinks default to the real ones. Without an explicit log sink, logging
/// writes console-style lines through whatever is live in the stdout slot.
#[derive(Default)]
pub struct ProcessBuilder {
    policy: InstallPolicy,
    exit: Option<Arc<dyn ExitSink>>,
    stdout: Option<Arc<dyn WriteSink>>,
    stderr: Option<Arc<dyn WriteSink>>,
    log: Option<Arc<dyn LogSink>>,
}

impl ProcessBuilder {
    pub fn policy(mut self, policy: InstallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn exit(mut self, sink: impl ExitSink + 'static) -> Self {
        self.exit = Some(Arc::new(sink));
        self
    }

    pub fn stdout(mut self, sink: impl WriteSink + 'static) -> Self {
        self.stdout = Some(Arc::new(sink));
        self
    }

    pub fn stderr(mut self, sink: impl WriteSink + 'static) -> Self {
        self.stderr = Some(Arc::new(sink));
        self
    }

    pub fn log(mut self, sink: impl LogSink + 'static) -> Self {
        self.log = Some(Arc::new(sink));
        self
    }

    pub fn build(self) -> Process {
        let stdout: Slot<dyn WriteSink, WriteCall, bool> = Slot::new(
            Target::Stdout,
            self.stdout
                .unwrap_or_else(|| Arc::new(StdStream::stdout()) as Arc<dyn WriteSink>),
        );
        let log = self
            .log
            .unwrap_or_else(|| Arc::new(ConsoleLog::new(stdout.route())) as Arc<dyn LogSink>);

        Process {
            policy: self.policy,
            exit: Slot::new(
                Target::Exit,
                self.exit
                    .unwrap_or_else(|| Arc::new(ProcessExit) as Arc<dyn ExitSink>),
            ),
            stdout,
            stderr: Slot::new(
                Target::Stderr,
                self.stderr
                    .unwrap_or_else(|| Arc::new(StdStream::stderr()) as Arc<dyn WriteSink>),
            ),
            log: Slot::new(Target::Log, log),
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recording stand-in handle.

use crate::call::{ExitCall, Invocation, LogCall, WriteCall};
use crate::process::Target;
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Spy over the exit slot.
pub type ExitSpy = Spy<ExitCall, ()>;
/// Spy over the stdout or stderr slot.
pub type WriteSpy = Spy<WriteCall, bool>;
/// Spy over the log slot.
pub type LogSpy = Spy<LogCall, ()>;

type RestoreFn = Box<dyn FnOnce() + Send>;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct Inner<A, R> {
    id: u64,
    target: Target,
    start: Instant,
    active: AtomicBool,
    calls: Mutex<Vec<Invocation<A, R>>>,
    restore: Mutex<Option<RestoreFn>>,
}

/// Handle to a recording stand-in.
///
/// Clones share one invocation history. While active, every call routed to the
/// stand-in is appended in call order; after [`restore`](Spy::restore) the
/// stand-in is inert and records nothing further.
pub struct Spy<A, R> {
    inner: Arc<Inner<A, R>>,
}

impl<A, R> Spy<A, R> {
    /// Create a standalone, active spy not attached to any process slot.
    pub fn new(target: Target) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
                target,
                start: Instant::now(),
                active: AtomicBool::new(true),
                calls: Mutex::new(Vec::new()),
                restore: Mutex::new(None),
            }),
        }
    }

    /// Attach the action that reinstalls the replaced implementation.
    pub(crate) fn on_restore(&self, restore: RestoreFn) {
        *self.inner.restore.lock() = Some(restore);
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn target(&self) -> Target {
        self.inner.target
    }

    /// Whether the stand-in still intercepts calls.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Record an invocation. Ignored once the spy has been restored.
    pub fn record(&self, args: A, returned: R) {
        if !self.is_active() {
            return;
        }
        let mut calls = self.inner.calls.lock();
        let seq = calls.len() as u64;
        calls.push(Invocation {
            seq,
            timestamp: SystemTime::now(),
            elapsed: self.inner.start.elapsed(),
            args,
            returned,
        });
    }

    /// Number of recorded calls
    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().len()
    }

    pub fn was_called(&self) -> bool {
        !self.inner.calls.lock().is_empty()
    }

    /// Count calls whose arguments match a predicate
    pub fn count_matching<F: Fn(&A) -> bool>(&self, pred: F) -> usize {
        self.inner
            .calls
            .lock()
            .iter()
            .filter(|c| pred(&c.args))
            .count()
    }

    /// Reset the history to empty. The stand-in stays installed.
    pub fn clear(&self) {
        self.inner.calls.lock().clear();
    }

    /// Reinstall the implementation that was live before this stand-in.
    ///
    /// Restoring twice is a no-op.
    pub fn restore(&self) {
        if !self.inner.active.swap(false, Ordering::AcqRel) {
            return;
        }
        // Take the action out before running it; it locks the owning slot.
        let restore = self.inner.restore.lock().take();
        if let Some(restore) = restore {
            restore();
        }
        tracing::debug!(target_sink = %self.inner.target, spy = self.inner.id, "stand-in restored");
    }
}

impl<A: Clone, R: Clone> Spy<A, R> {
    /// All recorded invocations, in call order
    pub fn calls(&self) -> Vec<Invocation<A, R>> {
        self.inner.calls.lock().clone()
    }

    /// Arguments of the n-th call (0-based)
    pub fn call(&self, n: usize) -> Option<A> {
        self.inner.calls.lock().get(n).map(|c| c.args.clone())
    }

    /// Arguments of the most recent call
    pub fn last_call(&self) -> Option<A> {
        self.inner.calls.lock().last().map(|c| c.args.clone())
    }

    /// The last N invocations, oldest first
    pub fn last(&self, n: usize) -> Vec<Invocation<A, R>> {
        let all = self.inner.calls.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }
}

impl<A: PartialEq, R> Spy<A, R> {
    /// Whether any call was made with exactly these arguments
    pub fn was_called_with(&self, args: &A) -> bool {
        self.inner.calls.lock().iter().any(|c| &c.args == args)
    }
}

impl<A, R: PartialEq> Spy<A, R> {
    /// Whether any call reported this value back to its caller
    pub fn returned_with(&self, value: &R) -> bool {
        self.inner.calls.lock().iter().any(|c| &c.returned == value)
    }
}

impl<A: Serialize, R: Serialize> Spy<A, R> {
    /// Write the history as JSON lines, one invocation per line.
    pub fn write_jsonl<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let calls = self.inner.calls.lock();
        for call in calls.iter() {
            serde_json::to_writer(&mut *writer, call)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl<A, R> Clone for Spy<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> std::fmt::Debug for Spy<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spy")
            .field("id", &self.inner.id)
            .field("target", &self.inner.target)
            .field("active", &self.is_active())
            .field("calls", &self.call_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "spy_tests.rs"]
mod tests;

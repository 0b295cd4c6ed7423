// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for tests that touch the process-wide registry.

#![allow(dead_code)]

use parking_lot::{Mutex, MutexGuard};

static SERIAL: Mutex<()> = Mutex::new(());

/// Exclusive use of the process-wide registry for one test.
///
/// Restores every stand-in on drop, including when the test panics, so a
/// failure never leaks interception into the next test.
pub struct Isolated {
    _guard: MutexGuard<'static, ()>,
}

impl Drop for Isolated {
    fn drop(&mut self) {
        procspy::restore_all_mocks();
    }
}

pub fn isolate() -> Isolated {
    let guard = SERIAL.lock();
    procspy::restore_all_mocks();
    Isolated { _guard: guard }
}

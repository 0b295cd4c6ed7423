// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All environment variables consulted by procspy are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Name of the variable selecting the process-wide install policy.
pub const PROCSPY_INSTALL_POLICY: &str = "PROCSPY_INSTALL_POLICY";

/// `PROCSPY_INSTALL_POLICY` — `fail-fast` or `reuse`.
///
/// Only read when the process-wide [`Process`](crate::Process) is first created.
pub fn install_policy() -> Option<String> {
    var_non_empty(PROCSPY_INSTALL_POLICY)
}

fn var_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while installing stand-ins.

use crate::process::Target;
use thiserror::Error;

/// Errors that can occur when intercepting a process sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterceptError {
    #[error("{0} is already intercepted; restore the active stand-in first")]
    AlreadyIntercepted(Target),

    #[error("unknown install policy '{0}' (expected 'fail-fast' or 'reuse')")]
    UnknownPolicy(String),
}

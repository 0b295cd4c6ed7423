// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::global::configured_policy;
use crate::process::InstallPolicy;
use serial_test::serial;

#[test]
#[serial]
fn install_policy_returns_none_when_unset() {
    std::env::remove_var(PROCSPY_INSTALL_POLICY);
    assert_eq!(install_policy(), None);
    assert_eq!(configured_policy(), InstallPolicy::FailFast);
}

#[test]
#[serial]
fn install_policy_trims_value() {
    std::env::set_var(PROCSPY_INSTALL_POLICY, "  reuse ");
    let raw = install_policy();
    let policy = configured_policy();
    std::env::remove_var(PROCSPY_INSTALL_POLICY);
    assert_eq!(raw, Some("reuse".to_string()));
    assert_eq!(policy, InstallPolicy::Reuse);
}

#[test]
#[serial]
fn install_policy_accepts_fail_fast() {
    std::env::set_var(PROCSPY_INSTALL_POLICY, "fail-fast");
    let policy = configured_policy();
    std::env::remove_var(PROCSPY_INSTALL_POLICY);
    assert_eq!(policy, InstallPolicy::FailFast);
}

#[test]
#[serial]
fn install_policy_ignores_blank_value() {
    for blank in ["", "   "] {
        std::env::set_var(PROCSPY_INSTALL_POLICY, blank);
        let raw = install_policy();
        let policy = configured_policy();
        std::env::remove_var(PROCSPY_INSTALL_POLICY);
        assert_eq!(raw, None, "{:?}", blank);
        assert_eq!(policy, InstallPolicy::FailFast, "{:?}", blank);
    }
}

#[test]
#[serial]
fn install_policy_falls_back_when_unparseable() {
    std::env::set_var(PROCSPY_INSTALL_POLICY, "stack");
    let raw = install_policy();
    let policy = configured_policy();
    std::env::remove_var(PROCSPY_INSTALL_POLICY);
    assert_eq!(raw, Some("stack".to_string()));
    assert_eq!(policy, InstallPolicy::FailFast);
}

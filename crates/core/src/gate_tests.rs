// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn gate_starts_idle() {
    let gate = FetchGate::new();
    assert_eq!(gate.state(), GateState::Idle);
    assert!(!gate.is_held());
}

#[test]
fn gate_first_enter_wins() {
    let mut gate = FetchGate::new();

    assert!(gate.try_enter());
    assert!(!gate.try_enter()); // Second caller is refused
    assert_eq!(gate.state(), GateState::InFlight);
}

#[test]
fn gate_exit_releases() {
    let mut gate = FetchGate::new();
    assert!(gate.try_enter());

    gate.exit();

    assert_eq!(gate.state(), GateState::Idle);
    assert!(gate.try_enter());
}

#[test]
fn gate_exit_when_idle_is_harmless() {
    let mut gate = FetchGate::new();
    gate.exit();
    assert_eq!(gate.state(), GateState::Idle);
}

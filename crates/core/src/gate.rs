// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Non-reentrant exclusion for fetches.
//!
//! At most one fetch per session may be in flight. A caller that cannot
//! enter the gate drops its request; nothing is queued.

/// State of a [`FetchGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    InFlight,
}

/// Two-state exclusion flag scoped to one session.
#[derive(Debug, Default)]
pub struct FetchGate {
    state: GateState,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves Idle → InFlight and returns true, or returns false without
    /// any change if a fetch is already in flight.
    pub fn try_enter(&mut self) -> bool {
        match self.state {
            GateState::Idle => {
                self.state = GateState::InFlight;
                true
            }
            GateState::InFlight => false,
        }
    }

    /// Returns to Idle unconditionally.
    pub fn exit(&mut self) {
        self.state = GateState::Idle;
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_held(&self) -> bool {
        self.state == GateState::InFlight
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;

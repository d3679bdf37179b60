//! Color cycle — a repeating hue rotation that can be paused around
//! one-shot commands.
//!
//! | From | Event | To |
//! |------|-------|----|
//! | `Idle` | start | `Running` (spawn ticker) |
//! | `Running` | stop | `StopPending` |
//! | `StopPending` | start | `Running` (same ticker) |
//! | `StopPending` | tick | `Idle` (ticker exits) |
//! | `Running` / `StopPending` | interrupt | `Idle` (ticker aborted) |
//!
//! This module only holds the pure transitions; the tasks that drive them
//! live in the application layer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// State of one conversation's color cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    #[default]
    Idle,
    Running,
    /// Stop was requested; the live ticker ends itself on its next tick.
    StopPending,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running => f.write_str("running"),
            Self::StopPending => f.write_str("stop_pending"),
        }
    }
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// No ticker was alive; a new one must be spawned.
    Spawn,
    /// The live ticker was re-armed before it observed the stop.
    Rearmed,
    /// Already running; nothing to do.
    AlreadyRunning,
}

/// Result of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The ticker will end on its next tick.
    Stopping,
    /// Nothing was running.
    AlreadyStopped,
}

/// What a ticker must do when it wakes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Rotate the hue and keep going.
    Rotate,
    /// Acknowledge the pending stop and exit.
    Finish,
    /// The ticker is no longer wanted; exit silently.
    Exit,
}

impl CycleState {
    /// Whether a ticker task is expected to be alive.
    #[must_use]
    pub fn has_ticker(self) -> bool {
        matches!(self, Self::Running | Self::StopPending)
    }

    /// Apply a start request.
    #[must_use]
    pub fn start(self) -> (Self, StartOutcome) {
        match self {
            Self::Idle => (Self::Running, StartOutcome::Spawn),
            Self::StopPending => (Self::Running, StartOutcome::Rearmed),
            Self::Running => (Self::Running, StartOutcome::AlreadyRunning),
        }
    }

    /// Apply a stop request.
    #[must_use]
    pub fn stop(self) -> (Self, StopOutcome) {
        match self {
            Self::Running => (Self::StopPending, StopOutcome::Stopping),
            Self::StopPending => (Self::StopPending, StopOutcome::Stopping),
            Self::Idle => (Self::Idle, StopOutcome::AlreadyStopped),
        }
    }

    /// Apply a ticker wake-up.
    #[must_use]
    pub fn tick(self) -> (Self, TickAction) {
        match self {
            Self::Running => (Self::Running, TickAction::Rotate),
            Self::StopPending => (Self::Idle, TickAction::Finish),
            Self::Idle => (Self::Idle, TickAction::Exit),
        }
    }

    /// Force the cycle off ahead of a one-shot command.
    ///
    /// Returns the new state and whether the cycle should be restarted once
    /// the one-shot command has completed.
    #[must_use]
    pub fn interrupt(self) -> (Self, bool) {
        (Self::Idle, self == Self::Running)
    }
}

/// Timing and color parameters of the cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSettings {
    /// Time between two hue rotations.
    pub tick: Duration,
    /// Delay before a cycle interrupted by a one-shot command restarts.
    pub resume_delay: Duration,
    /// Hue rotation per tick, in degrees.
    pub hue_delta: f64,
    /// Color set when the cycle starts.
    pub initial_color: String,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(6),
            resume_delay: Duration::from_secs(30),
            hue_delta: 30.0,
            initial_color: "hue:0 saturation:1.0".to_string(),
        }
    }
}

//! Event type definitions for the event bus.
//!
//! Events are organized by category and are cloneable and serializable so
//! they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::machine::{AxisLetter, JogSign, ProgramState};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Machine state changes
    Machine(MachineEvent),
    /// Program file and recent-file list changes
    File(FileEvent),
    /// Command failures and diagnostics
    Error(ErrorEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Machine(_) => EventCategory::Machine,
            AppEvent::File(_) => EventCategory::File,
            AppEvent::Error(_) => EventCategory::Error,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Machine(e) => e.description(),
            AppEvent::File(e) => e.description(),
            AppEvent::Error(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Machine state events.
    Machine,
    /// File events.
    File,
    /// Error events.
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Machine => write!(f, "Machine"),
            EventCategory::File => write!(f, "File"),
            EventCategory::Error => write!(f, "Error"),
        }
    }
}

/// Machine state events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MachineEvent {
    /// Emergency stop engaged or released.
    EstopChanged {
        /// Whether the estop is now active.
        active: bool,
    },
    /// Machine power switched.
    PowerChanged {
        /// Whether the machine is now powered.
        on: bool,
    },
    /// An axis finished homing.
    AxisHomed {
        /// The homed axis.
        axis: AxisLetter,
    },
    /// An axis lost its home reference.
    AxisUnhomed {
        /// The unhomed axis.
        axis: AxisLetter,
    },
    /// A jog request was accepted.
    Jog {
        /// Jogged axis.
        axis: AxisLetter,
        /// Direction, or stop.
        sign: JogSign,
    },
    /// Program interpreter state changed.
    ProgramStateChanged {
        /// The new state.
        state: ProgramState,
    },
}

impl MachineEvent {
    fn description(&self) -> String {
        match self {
            MachineEvent::EstopChanged { active } => {
                format!("E-stop {}", if *active { "active" } else { "reset" })
            }
            MachineEvent::PowerChanged { on } => {
                format!("Machine power {}", if *on { "on" } else { "off" })
            }
            MachineEvent::AxisHomed { axis } => format!("Axis {} homed", axis.upper()),
            MachineEvent::AxisUnhomed { axis } => format!("Axis {} unhomed", axis.upper()),
            MachineEvent::Jog { axis, sign } => format!("Jog {} at {}", axis.upper(), sign),
            MachineEvent::ProgramStateChanged { state } => format!("Program {}", state),
        }
    }
}

/// File related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileEvent {
    /// The recent-files list changed; carries the full updated list.
    RecentFilesChanged {
        /// Most recent first.
        files: Vec<String>,
    },
    /// A program was loaded into the interpreter.
    ProgramLoaded {
        /// Full path of the program.
        path: String,
    },
    /// Views showing the loaded program should reload it.
    ReloadRequested,
}

impl FileEvent {
    fn description(&self) -> String {
        match self {
            FileEvent::RecentFilesChanged { files } => {
                format!("Recent files changed ({} entries)", files.len())
            }
            FileEvent::ProgramLoaded { path } => format!("Program loaded: {}", path),
            FileEvent::ReloadRequested => "Program reload requested".to_string(),
        }
    }
}

/// Error and diagnostic events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ErrorEvent {
    /// A command forwarded by a control failed.
    CommandFailed {
        /// Command name.
        command: String,
        /// Failure reason.
        reason: String,
    },
}

impl ErrorEvent {
    fn description(&self) -> String {
        match self {
            ErrorEvent::CommandFailed { command, reason } => {
                format!("Command {} failed: {}", command, reason)
            }
        }
    }
}

//! Command interface to the motion controller
//!
//! [`CommandApi`] is the outbound side of the front end: bound controls call
//! it through their handlers. [`SimulatedMachine`] implements it on top of a
//! [`LiveStatus`], enforcing the same preconditions a real controller would.

use std::sync::Arc;

use crate::error::{CommandError, Result};
use crate::event_bus::{AppEvent, MachineEvent};
use crate::machine::{AxisLetter, JogSign, ProgramState};
use crate::status::{LiveStatus, StatusFacade};

/// Commands the front end can send to the machine.
pub trait CommandApi {
    /// Load a program into the interpreter
    fn load_program(&self, path: &str, add_to_recents: bool) -> Result<()>;

    /// Home a single axis
    fn home_axis(&self, axis: AxisLetter) -> Result<()>;

    /// Home every configured axis
    fn home_all(&self) -> Result<()>;

    /// Clear the home reference of an axis
    fn unhome_axis(&self, axis: AxisLetter) -> Result<()>;

    /// Start (or with [`JogSign::Stop`], stop) continuous jogging
    fn jog(&self, axis: AxisLetter, sign: JogSign) -> Result<()>;

    fn set_estop(&self, active: bool) -> Result<()>;

    fn set_power(&self, on: bool) -> Result<()>;

    fn run_program(&self) -> Result<()>;

    fn pause_program(&self) -> Result<()>;

    fn resume_program(&self) -> Result<()>;

    fn abort_program(&self) -> Result<()>;
}

/// In-process machine used by the binary and integration tests.
#[derive(Debug, Clone)]
pub struct SimulatedMachine {
    status: Arc<LiveStatus>,
}

impl SimulatedMachine {
    pub fn new(status: Arc<LiveStatus>) -> Self {
        Self { status }
    }

    pub fn status(&self) -> &Arc<LiveStatus> {
        &self.status
    }

    fn ensure_configured(&self, axis: AxisLetter) -> Result<()> {
        if self.status.axis_letters().contains(&axis) {
            Ok(())
        } else {
            Err(CommandError::AxisNotConfigured {
                axis: axis.to_string(),
            }
            .into())
        }
    }

    fn ensure_homing_possible(&self, command: &str) -> Result<()> {
        if self.status.is_homing_possible() {
            Ok(())
        } else {
            Err(CommandError::not_ready(command, self.not_ready_reason()).into())
        }
    }

    fn ensure_motion_allowed(&self, command: &str) -> Result<()> {
        if self.status.is_estop_active() || !self.status.is_powered_on() {
            return Err(CommandError::not_ready(command, self.not_ready_reason()).into());
        }
        Ok(())
    }

    fn not_ready_reason(&self) -> &'static str {
        if self.status.is_estop_active() {
            "e-stop is active"
        } else if !self.status.is_powered_on() {
            "machine is off"
        } else {
            "a program is running"
        }
    }
}

impl CommandApi for SimulatedMachine {
    fn load_program(&self, path: &str, add_to_recents: bool) -> Result<()> {
        if path.trim().is_empty() {
            return Err(CommandError::InvalidProgram {
                path: path.to_string(),
            }
            .into());
        }
        if self.status.program_state() != ProgramState::Idle {
            return Err(CommandError::not_ready("load program", "a program is running").into());
        }
        tracing::info!("Loading program {}", path);
        self.status.set_loaded_program(path);
        if add_to_recents {
            self.status.add_recent_file(path);
        }
        Ok(())
    }

    fn home_axis(&self, axis: AxisLetter) -> Result<()> {
        self.ensure_configured(axis)?;
        self.ensure_homing_possible("home axis")?;
        tracing::info!("Homing axis {}", axis.upper());
        self.status.mark_homed(axis);
        Ok(())
    }

    fn home_all(&self) -> Result<()> {
        self.ensure_homing_possible("home all")?;
        tracing::info!("Homing all axes");
        for axis in self.status.axis_letters() {
            self.status.mark_homed(axis);
        }
        Ok(())
    }

    fn unhome_axis(&self, axis: AxisLetter) -> Result<()> {
        self.ensure_configured(axis)?;
        tracing::info!("Unhoming axis {}", axis.upper());
        self.status.mark_unhomed(axis);
        Ok(())
    }

    fn jog(&self, axis: AxisLetter, sign: JogSign) -> Result<()> {
        self.ensure_configured(axis)?;
        if sign != JogSign::Stop {
            self.ensure_motion_allowed("jog")?;
            if self.status.program_state() != ProgramState::Idle {
                return Err(CommandError::not_ready("jog", "a program is running").into());
            }
        }
        tracing::debug!("Jog {} at {}", axis.upper(), sign);
        self.status
            .bus()
            .publish(AppEvent::Machine(MachineEvent::Jog { axis, sign }))
            .ok();
        Ok(())
    }

    fn set_estop(&self, active: bool) -> Result<()> {
        tracing::info!("E-stop {}", if active { "engaged" } else { "reset" });
        self.status.set_estop(active);
        if active {
            self.status.set_program_state(ProgramState::Idle);
        }
        Ok(())
    }

    fn set_power(&self, on: bool) -> Result<()> {
        if on && self.status.is_estop_active() {
            return Err(CommandError::not_ready("power on", "e-stop is active").into());
        }
        tracing::info!("Machine power {}", if on { "on" } else { "off" });
        self.status.set_power(on);
        if !on {
            self.status.set_program_state(ProgramState::Idle);
        }
        Ok(())
    }

    fn run_program(&self) -> Result<()> {
        self.ensure_motion_allowed("run")?;
        if !self.status.is_program_loaded() {
            return Err(CommandError::not_ready("run", "no program loaded").into());
        }
        if self.status.program_state() != ProgramState::Idle {
            return Err(CommandError::not_ready("run", "a program is running").into());
        }
        self.status.set_program_state(ProgramState::Running);
        Ok(())
    }

    fn pause_program(&self) -> Result<()> {
        if self.status.program_state() != ProgramState::Running {
            return Err(CommandError::not_ready("pause", "no program is running").into());
        }
        self.status.set_program_state(ProgramState::Paused);
        Ok(())
    }

    fn resume_program(&self) -> Result<()> {
        if self.status.program_state() != ProgramState::Paused {
            return Err(CommandError::not_ready("resume", "program is not paused").into());
        }
        self.status.set_program_state(ProgramState::Running);
        Ok(())
    }

    fn abort_program(&self) -> Result<()> {
        self.status.set_program_state(ProgramState::Idle);
        Ok(())
    }
}

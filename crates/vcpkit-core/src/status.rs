//! Live machine status
//!
//! [`StatusFacade`] is the read side the front end depends on. [`LiveStatus`]
//! is the in-process store behind it: every mutation updates the snapshot and
//! then publishes the matching event on the [`EventBus`], so views never poll.

use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::event_bus::{AppEvent, EventBus, FileEvent, MachineEvent};
use crate::machine::{canonical_axes, AxisLetter, ProgramState};

/// Read access to the current machine state.
pub trait StatusFacade {
    /// Recently opened programs, most recent first
    fn recent_files(&self) -> Vec<String>;

    /// Maximum length of the recent-files list
    fn max_recent_files(&self) -> usize;

    /// Configured axes in canonical order
    fn axis_letters(&self) -> Vec<AxisLetter>;

    /// Full path of the loaded program, if any
    fn loaded_program(&self) -> Option<String>;

    fn is_estop_active(&self) -> bool;

    fn is_powered_on(&self) -> bool;

    fn is_homed(&self, axis: AxisLetter) -> bool;

    fn program_state(&self) -> ProgramState;

    /// Homing needs a powered, released machine with nothing running
    fn is_homing_possible(&self) -> bool {
        !self.is_estop_active() && self.is_powered_on() && self.program_state() == ProgramState::Idle
    }

    fn is_program_loaded(&self) -> bool {
        self.loaded_program().is_some()
    }
}

#[derive(Debug, Clone)]
struct StatusSnapshot {
    recent_files: Vec<String>,
    max_recent_files: usize,
    axes: Vec<AxisLetter>,
    loaded_program: Option<String>,
    estop: bool,
    powered: bool,
    homed: BTreeSet<AxisLetter>,
    program_state: ProgramState,
}

/// Thread-safe status store that publishes every change.
pub struct LiveStatus {
    state: RwLock<StatusSnapshot>,
    bus: Arc<EventBus>,
}

impl LiveStatus {
    /// Create a status store for the given axes.
    ///
    /// The machine starts with the e-stop engaged and power off.
    pub fn new(
        bus: Arc<EventBus>,
        axes: impl IntoIterator<Item = AxisLetter>,
        max_recent_files: usize,
    ) -> Self {
        Self {
            state: RwLock::new(StatusSnapshot {
                recent_files: Vec::new(),
                max_recent_files,
                axes: canonical_axes(axes),
                loaded_program: None,
                estop: true,
                powered: false,
                homed: BTreeSet::new(),
                program_state: ProgramState::Idle,
            }),
            bus,
        }
    }

    /// Seed the recent-files list without publishing
    pub fn with_recent_files(self, files: impl IntoIterator<Item = String>) -> Self {
        {
            let mut state = self.state.write();
            state.recent_files = files.into_iter().collect();
            let max = state.max_recent_files;
            state.recent_files.truncate(max);
        }
        self
    }

    /// The bus this store publishes on
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    fn publish(&self, event: AppEvent) {
        if self.bus.publish(event).is_err() {
            tracing::trace!("Status event dropped, nobody listening");
        }
    }

    fn publish_recent(&self, files: Vec<String>) {
        self.publish(AppEvent::File(FileEvent::RecentFilesChanged { files }));
    }

    /// Move `path` to the front of the recent list, trimming to the maximum
    pub fn add_recent_file(&self, path: impl Into<String>) {
        let path = path.into();
        let files = {
            let mut state = self.state.write();
            state.recent_files.retain(|f| f != &path);
            state.recent_files.insert(0, path);
            let max = state.max_recent_files;
            state.recent_files.truncate(max);
            state.recent_files.clone()
        };
        self.publish_recent(files);
    }

    /// Replace the recent list
    pub fn set_recent_files(&self, files: Vec<String>) {
        let files = {
            let mut state = self.state.write();
            state.recent_files = files;
            let max = state.max_recent_files;
            state.recent_files.truncate(max);
            state.recent_files.clone()
        };
        self.publish_recent(files);
    }

    pub fn clear_recent_files(&self) {
        self.set_recent_files(Vec::new());
    }

    /// Change the maximum; the list is trimmed and republished if it shrank
    pub fn set_max_recent_files(&self, max: usize) {
        let trimmed = {
            let mut state = self.state.write();
            state.max_recent_files = max;
            if state.recent_files.len() > max {
                state.recent_files.truncate(max);
                Some(state.recent_files.clone())
            } else {
                None
            }
        };
        if let Some(files) = trimmed {
            self.publish_recent(files);
        }
    }

    pub fn set_loaded_program(&self, path: impl Into<String>) {
        let path = path.into();
        self.state.write().loaded_program = Some(path.clone());
        self.publish(AppEvent::File(FileEvent::ProgramLoaded { path }));
    }

    /// Engaging the e-stop also drops machine power
    pub fn set_estop(&self, active: bool) {
        let power_dropped = {
            let mut state = self.state.write();
            if state.estop == active {
                return;
            }
            state.estop = active;
            let dropped = active && state.powered;
            if dropped {
                state.powered = false;
            }
            dropped
        };
        self.publish(AppEvent::Machine(MachineEvent::EstopChanged { active }));
        if power_dropped {
            self.publish(AppEvent::Machine(MachineEvent::PowerChanged { on: false }));
        }
    }

    pub fn set_power(&self, on: bool) {
        {
            let mut state = self.state.write();
            if state.powered == on {
                return;
            }
            state.powered = on;
        }
        self.publish(AppEvent::Machine(MachineEvent::PowerChanged { on }));
    }

    pub fn set_program_state(&self, program_state: ProgramState) {
        {
            let mut state = self.state.write();
            if state.program_state == program_state {
                return;
            }
            state.program_state = program_state;
        }
        self.publish(AppEvent::Machine(MachineEvent::ProgramStateChanged {
            state: program_state,
        }));
    }

    pub fn mark_homed(&self, axis: AxisLetter) {
        if self.state.write().homed.insert(axis) {
            self.publish(AppEvent::Machine(MachineEvent::AxisHomed { axis }));
        }
    }

    pub fn mark_unhomed(&self, axis: AxisLetter) {
        if self.state.write().homed.remove(&axis) {
            self.publish(AppEvent::Machine(MachineEvent::AxisUnhomed { axis }));
        }
    }
}

impl StatusFacade for LiveStatus {
    fn recent_files(&self) -> Vec<String> {
        self.state.read().recent_files.clone()
    }

    fn max_recent_files(&self) -> usize {
        self.state.read().max_recent_files
    }

    fn axis_letters(&self) -> Vec<AxisLetter> {
        self.state.read().axes.clone()
    }

    fn loaded_program(&self) -> Option<String> {
        self.state.read().loaded_program.clone()
    }

    fn is_estop_active(&self) -> bool {
        self.state.read().estop
    }

    fn is_powered_on(&self) -> bool {
        self.state.read().powered
    }

    fn is_homed(&self, axis: AxisLetter) -> bool {
        self.state.read().homed.contains(&axis)
    }

    fn program_state(&self) -> ProgramState {
        self.state.read().program_state
    }
}

impl std::fmt::Debug for LiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveStatus")
            .field("state", &*self.state.read())
            .finish()
    }
}

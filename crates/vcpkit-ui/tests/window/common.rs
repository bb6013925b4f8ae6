use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use vcpkit_core::{
    AxisLetter, CommandApi, EventBus, JogSign, LiveStatus, ProgramState, Result, StatusFacade,
};
use vcpkit_ui::{HandlerContext, UiDispatcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(String, bool),
    HomeAxis(char),
    HomeAll,
    Jog(char, JogSign),
    Other(&'static str),
}

/// Command sink that records every call and accepts it
#[derive(Default)]
pub struct Recorder {
    calls: RefCell<Vec<Call>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn push(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl CommandApi for Recorder {
    fn load_program(&self, path: &str, add_to_recents: bool) -> Result<()> {
        self.push(Call::Load(path.to_string(), add_to_recents))
    }
    fn home_axis(&self, axis: AxisLetter) -> Result<()> {
        self.push(Call::HomeAxis(axis.as_char()))
    }
    fn home_all(&self) -> Result<()> {
        self.push(Call::HomeAll)
    }
    fn unhome_axis(&self, _axis: AxisLetter) -> Result<()> {
        self.push(Call::Other("unhome"))
    }
    fn jog(&self, axis: AxisLetter, sign: JogSign) -> Result<()> {
        self.push(Call::Jog(axis.as_char(), sign))
    }
    fn set_estop(&self, _active: bool) -> Result<()> {
        self.push(Call::Other("estop"))
    }
    fn set_power(&self, _on: bool) -> Result<()> {
        self.push(Call::Other("power"))
    }
    fn run_program(&self) -> Result<()> {
        self.push(Call::Other("run"))
    }
    fn pause_program(&self) -> Result<()> {
        self.push(Call::Other("pause"))
    }
    fn resume_program(&self) -> Result<()> {
        self.push(Call::Other("resume"))
    }
    fn abort_program(&self) -> Result<()> {
        self.push(Call::Other("abort"))
    }
}

pub struct Harness {
    pub bus: Arc<EventBus>,
    pub status: Arc<LiveStatus>,
    pub commands: Rc<Recorder>,
    pub ctx: HandlerContext,
}

/// Powered machine with the given axes and recent-files capacity
pub fn harness(axes: &str, max_recent_files: usize) -> Harness {
    let bus = Arc::new(EventBus::new());
    let status = Arc::new(LiveStatus::new(
        bus.clone(),
        AxisLetter::parse_list(axes).expect("valid axes"),
        max_recent_files,
    ));
    status.set_estop(false);
    status.set_power(true);
    let dispatcher = Rc::new(UiDispatcher::new(&bus));
    let commands = Rc::new(Recorder::default());
    let ctx = HandlerContext::new(commands.clone(), status.clone(), bus.clone(), dispatcher);
    Harness {
        bus,
        status,
        commands,
        ctx,
    }
}

/// Status whose axis list can be swapped after construction
pub struct MutableAxes {
    pub axes: Mutex<Vec<AxisLetter>>,
}

impl StatusFacade for MutableAxes {
    fn recent_files(&self) -> Vec<String> {
        Vec::new()
    }
    fn max_recent_files(&self) -> usize {
        5
    }
    fn axis_letters(&self) -> Vec<AxisLetter> {
        self.axes.lock().map(|a| a.clone()).unwrap_or_default()
    }
    fn loaded_program(&self) -> Option<String> {
        None
    }
    fn is_estop_active(&self) -> bool {
        false
    }
    fn is_powered_on(&self) -> bool {
        true
    }
    fn is_homed(&self, _axis: AxisLetter) -> bool {
        false
    }
    fn program_state(&self) -> ProgramState {
        ProgramState::Idle
    }
}

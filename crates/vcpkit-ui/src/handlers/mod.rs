//! Action handlers
//!
//! A handler is the behavior object bound to one control. It decides what
//! triggering the control does and keeps the control's enabled and checked
//! state in line with machine status. Four families exist, named by
//! [`HandlerKey`]; the variant segment of a control name picks the exact
//! behavior within a family.

mod home;
mod jog;
mod machine;
mod program;

pub use home::{HomeHandler, HomeMethod};
pub use jog::JogHandler;
pub use machine::{MachineHandler, MachineToggle};
pub use program::{FileChooser, ProgramAction, ProgramHandler};

use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use std::sync::Arc;

use vcpkit_core::{
    AppEvent, CommandApi, ErrorEvent, EventBus, EventCategory, EventFilter, StatusFacade,
};

use crate::control::Control;
use crate::dispatch::UiDispatcher;

/// Handler families a control name can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandlerKey {
    Home,
    Machine,
    Program,
    Jog,
}

impl HandlerKey {
    pub const ALL: [HandlerKey; 4] = [
        HandlerKey::Home,
        HandlerKey::Machine,
        HandlerKey::Program,
        HandlerKey::Jog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandlerKey::Home => "Home",
            HandlerKey::Machine => "Machine",
            HandlerKey::Program => "Program",
            HandlerKey::Jog => "Jog",
        }
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlerKey {
    type Err = String;

    /// Keys match exactly; `home` is not `Home`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandlerKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Collaborators every handler is constructed with
#[derive(Clone)]
pub struct HandlerContext {
    pub commands: Rc<dyn CommandApi>,
    pub status: Arc<dyn StatusFacade>,
    pub bus: Arc<EventBus>,
    pub dispatcher: Rc<UiDispatcher>,
    /// Needed by `Program_open`; binding that control fails without one
    pub file_chooser: Option<Rc<dyn FileChooser>>,
}

impl HandlerContext {
    pub fn new(
        commands: Rc<dyn CommandApi>,
        status: Arc<dyn StatusFacade>,
        bus: Arc<EventBus>,
        dispatcher: Rc<UiDispatcher>,
    ) -> Self {
        Self {
            commands,
            status,
            bus,
            dispatcher,
            file_chooser: None,
        }
    }

    pub fn with_file_chooser(mut self, chooser: Rc<dyn FileChooser>) -> Self {
        self.file_chooser = Some(chooser);
        self
    }

    /// Log a failed command and publish it for the status bar
    pub fn report_failure(&self, command: &str, error: &vcpkit_core::Error) {
        report_failure(&self.bus, command, error);
    }
}

pub(crate) fn report_failure(bus: &EventBus, command: &str, error: &vcpkit_core::Error) {
    tracing::warn!("{} failed: {}", command, error);
    let event = AppEvent::Error(ErrorEvent::CommandFailed {
        command: command.to_string(),
        reason: error.to_string(),
    });
    if bus.publish(event).is_err() {
        tracing::trace!("No listener for command failure");
    }
}

impl fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("dispatcher", &self.dispatcher)
            .field("file_chooser", &self.file_chooser.is_some())
            .finish_non_exhaustive()
    }
}

/// Behavior bound to a single control.
pub trait Handler {
    fn key(&self) -> HandlerKey;

    /// Name of the operation this instance performs, if it performs one
    fn method(&self) -> Option<&'static str>;

    /// The variant it was constructed with
    fn variant(&self) -> &str;

    fn control(&self) -> &Control;

    /// Perform the operation; called when the control fires
    fn activate(&self);

    /// Recompute the control's enabled and checked state from status
    fn refresh(&self);
}

/// Constructs a handler for a control and a variant.
pub type HandlerFactory =
    fn(&HandlerContext, Control, &str) -> Result<Rc<dyn Handler>, crate::error::HandlerError>;

/// Connect a freshly built handler to its control and to status updates.
///
/// The control and the dispatcher only hold weak references, so the handler
/// lives exactly as long as whoever owns the returned `Rc` (the bindings).
pub fn attach(handler: &Rc<dyn Handler>, dispatcher: &UiDispatcher) {
    let weak: Weak<dyn Handler> = Rc::downgrade(handler);
    handler.control().connect_triggered({
        let weak = weak.clone();
        move |_| {
            if let Some(handler) = weak.upgrade() {
                handler.activate();
            }
        }
    });

    dispatcher.subscribe_while(
        EventFilter::Categories(vec![EventCategory::Machine, EventCategory::File]),
        move |_| match weak.upgrade() {
            Some(handler) => {
                handler.refresh();
                true
            }
            None => false,
        },
    );

    handler.refresh();
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording command mock and a context builder for handler tests.

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use vcpkit_core::{
        AxisLetter, CommandApi, CommandError, EventBus, JogSign, LiveStatus, Result,
    };

    use super::HandlerContext;
    use crate::dispatch::UiDispatcher;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Load(String, bool),
        HomeAxis(char),
        HomeAll,
        Unhome(char),
        Jog(char, JogSign),
        Estop(bool),
        Power(bool),
        Run,
        Pause,
        Resume,
        Abort,
    }

    #[derive(Default)]
    pub struct RecordingCommands {
        pub calls: RefCell<Vec<Call>>,
        pub fail: RefCell<bool>,
    }

    impl RecordingCommands {
        fn record(&self, call: Call) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if *self.fail.borrow() {
                Err(CommandError::Rejected {
                    reason: "refused".into(),
                }
                .into())
            } else {
                Ok(())
            }
        }

        pub fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }
    }

    impl CommandApi for RecordingCommands {
        fn load_program(&self, path: &str, add: bool) -> Result<()> {
            self.record(Call::Load(path.into(), add))
        }
        fn home_axis(&self, axis: AxisLetter) -> Result<()> {
            self.record(Call::HomeAxis(axis.as_char()))
        }
        fn home_all(&self) -> Result<()> {
            self.record(Call::HomeAll)
        }
        fn unhome_axis(&self, axis: AxisLetter) -> Result<()> {
            self.record(Call::Unhome(axis.as_char()))
        }
        fn jog(&self, axis: AxisLetter, sign: JogSign) -> Result<()> {
            self.record(Call::Jog(axis.as_char(), sign))
        }
        fn set_estop(&self, active: bool) -> Result<()> {
            self.record(Call::Estop(active))
        }
        fn set_power(&self, on: bool) -> Result<()> {
            self.record(Call::Power(on))
        }
        fn run_program(&self) -> Result<()> {
            self.record(Call::Run)
        }
        fn pause_program(&self) -> Result<()> {
            self.record(Call::Pause)
        }
        fn resume_program(&self) -> Result<()> {
            self.record(Call::Resume)
        }
        fn abort_program(&self) -> Result<()> {
            self.record(Call::Abort)
        }
    }

    pub struct Fixture {
        pub bus: Arc<EventBus>,
        pub status: Arc<LiveStatus>,
        pub commands: Rc<RecordingCommands>,
        pub ctx: HandlerContext,
    }

    /// A released, powered xyz machine
    pub fn fixture() -> Fixture {
        let bus = Arc::new(EventBus::new());
        let axes = AxisLetter::parse_list("xyz").unwrap();
        let status = Arc::new(LiveStatus::new(bus.clone(), axes, 5));
        status.set_estop(false);
        status.set_power(true);
        let dispatcher = Rc::new(UiDispatcher::new(&bus));
        let commands = Rc::new(RecordingCommands::default());
        let ctx = HandlerContext::new(commands.clone(), status.clone(), bus.clone(), dispatcher);
        Fixture {
            bus,
            status,
            commands,
            ctx,
        }
    }
}

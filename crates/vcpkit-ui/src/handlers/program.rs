//! Program file and execution actions

use std::rc::Rc;

use vcpkit_core::{AppEvent, FileEvent, ProgramState};

use super::{Handler, HandlerContext, HandlerKey};
use crate::control::Control;
use crate::error::HandlerError;

/// Asks the user for a program to open.
pub trait FileChooser {
    /// Full path of the chosen program, `None` if cancelled
    fn choose_program(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramAction {
    Open,
    Reload,
    Run,
    Pause,
    Resume,
    Abort,
}

impl ProgramAction {
    pub fn from_variant(variant: &str) -> Result<Self, HandlerError> {
        Ok(match variant {
            "open" => ProgramAction::Open,
            "reload" => ProgramAction::Reload,
            "run" => ProgramAction::Run,
            "pause" => ProgramAction::Pause,
            "resume" => ProgramAction::Resume,
            "abort" => ProgramAction::Abort,
            other => {
                return Err(HandlerError::UnsupportedVariant {
                    handler: HandlerKey::Program,
                    variant: other.to_string(),
                })
            }
        })
    }

    fn selector(self) -> &'static str {
        match self {
            ProgramAction::Open => "openProgram",
            ProgramAction::Reload => "reloadProgram",
            ProgramAction::Run => "runProgram",
            ProgramAction::Pause => "pauseProgram",
            ProgramAction::Resume => "resumeProgram",
            ProgramAction::Abort => "abortProgram",
        }
    }
}

pub struct ProgramHandler {
    ctx: HandlerContext,
    control: Control,
    action: ProgramAction,
    variant: String,
    chooser: Option<Rc<dyn FileChooser>>,
}

impl ProgramHandler {
    pub(crate) fn create(
        ctx: &HandlerContext,
        control: Control,
        variant: &str,
    ) -> Result<Rc<dyn Handler>, HandlerError> {
        let action = ProgramAction::from_variant(variant)?;
        let chooser = ctx.file_chooser.clone();
        if action == ProgramAction::Open && chooser.is_none() {
            return Err(HandlerError::MissingCollaborator {
                handler: HandlerKey::Program,
                collaborator: "file chooser",
            });
        }
        Ok(Rc::new(Self {
            ctx: ctx.clone(),
            control,
            action,
            variant: variant.to_string(),
            chooser,
        }))
    }

    fn open(&self) {
        let Some(chooser) = &self.chooser else {
            return;
        };
        match chooser.choose_program() {
            Some(path) => {
                if let Err(e) = self.ctx.commands.load_program(&path, true) {
                    self.ctx.report_failure("open program", &e);
                }
            }
            None => tracing::debug!("Open program cancelled"),
        }
    }

    fn reload(&self) {
        let event = AppEvent::File(FileEvent::ReloadRequested);
        if self.ctx.bus.publish(event).is_err() {
            tracing::debug!("Reload requested but no view is listening");
        }
    }
}

impl Handler for ProgramHandler {
    fn key(&self) -> HandlerKey {
        HandlerKey::Program
    }

    fn method(&self) -> Option<&'static str> {
        Some(self.action.selector())
    }

    fn variant(&self) -> &str {
        &self.variant
    }

    fn control(&self) -> &Control {
        &self.control
    }

    fn activate(&self) {
        let commands = &self.ctx.commands;
        let (label, result) = match self.action {
            ProgramAction::Open => return self.open(),
            ProgramAction::Reload => return self.reload(),
            ProgramAction::Run => ("run program", commands.run_program()),
            ProgramAction::Pause => ("pause program", commands.pause_program()),
            ProgramAction::Resume => ("resume program", commands.resume_program()),
            ProgramAction::Abort => ("abort program", commands.abort_program()),
        };
        if let Err(e) = result {
            self.ctx.report_failure(label, &e);
        }
    }

    fn refresh(&self) {
        let status = &self.ctx.status;
        let state = status.program_state();
        let idle = state == ProgramState::Idle;
        let enabled = match self.action {
            ProgramAction::Open => idle,
            ProgramAction::Reload => idle && status.is_program_loaded(),
            ProgramAction::Run => {
                idle
                    && status.is_program_loaded()
                    && status.is_powered_on()
                    && !status.is_estop_active()
            }
            ProgramAction::Pause => state == ProgramState::Running,
            ProgramAction::Resume => state == ProgramState::Paused,
            ProgramAction::Abort => !idle,
        };
        self.control.set_enabled(enabled);
    }
}

//! Continuous jog toggles
//!
//! Variant `<axis>_pos` or `<axis>_neg`. Checking the control starts the
//! jog, unchecking it stops the axis.

use std::rc::Rc;

use vcpkit_core::{AxisLetter, CommandError, JogSign, ProgramState};

use super::{Handler, HandlerContext, HandlerKey};
use crate::control::Control;
use crate::error::HandlerError;

pub struct JogHandler {
    ctx: HandlerContext,
    control: Control,
    axis: AxisLetter,
    sign: JogSign,
    variant: String,
}

fn parse_variant(variant: &str) -> Result<(AxisLetter, JogSign), HandlerError> {
    let unsupported = || HandlerError::UnsupportedVariant {
        handler: HandlerKey::Jog,
        variant: variant.to_string(),
    };
    let (axis, direction) = variant.split_once('_').ok_or_else(unsupported)?;
    let sign = match direction {
        "pos" => JogSign::Positive,
        "neg" => JogSign::Negative,
        _ => return Err(unsupported()),
    };
    Ok((AxisLetter::parse(axis)?, sign))
}

impl JogHandler {
    pub(crate) fn create(
        ctx: &HandlerContext,
        control: Control,
        variant: &str,
    ) -> Result<Rc<dyn Handler>, HandlerError> {
        let (axis, sign) = parse_variant(variant)?;
        if !ctx.status.axis_letters().contains(&axis) {
            return Err(CommandError::AxisNotConfigured {
                axis: axis.to_string(),
            }
            .into());
        }
        control.set_checkable(true);
        Ok(Rc::new(Self {
            ctx: ctx.clone(),
            control,
            axis,
            sign,
            variant: variant.to_string(),
        }))
    }

    fn motion_allowed(&self) -> bool {
        let status = &self.ctx.status;
        status.is_powered_on()
            && !status.is_estop_active()
            && status.program_state() == ProgramState::Idle
    }
}

impl Handler for JogHandler {
    fn key(&self) -> HandlerKey {
        HandlerKey::Jog
    }

    fn method(&self) -> Option<&'static str> {
        Some("autoJog")
    }

    fn variant(&self) -> &str {
        &self.variant
    }

    fn control(&self) -> &Control {
        &self.control
    }

    fn activate(&self) {
        let sign = if self.control.is_checked() {
            self.sign
        } else {
            JogSign::Stop
        };
        if let Err(e) = self.ctx.commands.jog(self.axis, sign) {
            self.control.set_checked(false);
            self.ctx.report_failure("jog", &e);
        }
    }

    fn refresh(&self) {
        let allowed = self.motion_allowed();
        self.control.set_enabled(allowed);
        if !allowed && self.control.is_checked() {
            // Running jog must not outlive its toggle
            if let Err(e) = self.ctx.commands.jog(self.axis, JogSign::Stop) {
                self.ctx.report_failure("stop jog", &e);
            }
            self.control.set_checked(false);
        }
    }
}

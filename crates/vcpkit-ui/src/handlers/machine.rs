//! E-stop and power toggles

use std::rc::Rc;

use super::{Handler, HandlerContext, HandlerKey};
use crate::control::Control;
use crate::error::HandlerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineToggle {
    Estop,
    Power,
}

impl MachineToggle {
    pub fn from_variant(variant: &str) -> Result<Self, HandlerError> {
        match variant {
            "estop" => Ok(MachineToggle::Estop),
            "power" => Ok(MachineToggle::Power),
            other => Err(HandlerError::UnsupportedVariant {
                handler: HandlerKey::Machine,
                variant: other.to_string(),
            }),
        }
    }
}

/// Checkable control mirroring e-stop or power state
pub struct MachineHandler {
    ctx: HandlerContext,
    control: Control,
    toggle: MachineToggle,
    variant: String,
}

impl MachineHandler {
    pub(crate) fn create(
        ctx: &HandlerContext,
        control: Control,
        variant: &str,
    ) -> Result<Rc<dyn Handler>, HandlerError> {
        let toggle = MachineToggle::from_variant(variant)?;
        control.set_checkable(true);
        Ok(Rc::new(Self {
            ctx: ctx.clone(),
            control,
            toggle,
            variant: variant.to_string(),
        }))
    }
}

impl Handler for MachineHandler {
    fn key(&self) -> HandlerKey {
        HandlerKey::Machine
    }

    fn method(&self) -> Option<&'static str> {
        Some(match self.toggle {
            MachineToggle::Estop => "toggleEstop",
            MachineToggle::Power => "togglePower",
        })
    }

    fn variant(&self) -> &str {
        &self.variant
    }

    fn control(&self) -> &Control {
        &self.control
    }

    fn activate(&self) {
        let status = &self.ctx.status;
        let commands = &self.ctx.commands;
        let (label, result) = match self.toggle {
            MachineToggle::Estop => ("e-stop", commands.set_estop(!status.is_estop_active())),
            MachineToggle::Power => ("power", commands.set_power(!status.is_powered_on())),
        };
        if let Err(e) = result {
            self.ctx.report_failure(label, &e);
        }
        // The trigger already flipped the check mark; put it back in line
        // with the machine if the command did not take.
        self.refresh();
    }

    fn refresh(&self) {
        let status = &self.ctx.status;
        match self.toggle {
            MachineToggle::Estop => {
                self.control.set_enabled(true);
                self.control.set_checked(status.is_estop_active());
            }
            MachineToggle::Power => {
                self.control.set_enabled(!status.is_estop_active());
                self.control.set_checked(status.is_powered_on());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::attach;
    use crate::handlers::testing::{fixture, Call};

    #[test]
    fn test_estop_toggle() {
        let fx = fixture();
        let control = Control::new("action_Machine_estop");
        let handler = MachineHandler::create(&fx.ctx, control.clone(), "estop").unwrap();
        attach(&handler, &fx.ctx.dispatcher);
        assert!(control.is_checkable());
        assert!(!control.is_checked());

        control.trigger();
        assert_eq!(fx.commands.take(), vec![Call::Estop(true)]);
    }

    #[test]
    fn test_power_follows_status() {
        let fx = fixture();
        let control = Control::new("action_Machine_power");
        let handler = MachineHandler::create(&fx.ctx, control.clone(), "power").unwrap();
        attach(&handler, &fx.ctx.dispatcher);
        assert!(control.is_checked());

        fx.status.set_estop(true);
        fx.ctx.dispatcher.pump();
        assert!(!control.is_enabled());
        assert!(!control.is_checked());
    }

    #[test]
    fn test_failed_toggle_restores_check() {
        let fx = fixture();
        *fx.commands.fail.borrow_mut() = true;
        let control = Control::new("action_Machine_power");
        let handler = MachineHandler::create(&fx.ctx, control.clone(), "power").unwrap();
        attach(&handler, &fx.ctx.dispatcher);

        control.trigger();
        assert_eq!(fx.commands.take(), vec![Call::Power(false)]);
        assert!(control.is_checked());
    }

    #[test]
    fn test_unknown_variant() {
        let fx = fixture();
        assert!(matches!(
            MachineHandler::create(&fx.ctx, Control::new("action_Machine_mist"), "mist"),
            Err(HandlerError::UnsupportedVariant { .. })
        ));
    }
}

//! Homing actions

use std::rc::Rc;

use vcpkit_core::{AxisLetter, CommandError};

use super::{Handler, HandlerContext, HandlerKey};
use crate::control::Control;
use crate::error::HandlerError;

const UNHOME_PREFIX: &str = "unhome_";

/// What a home control does when triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeMethod {
    /// Nothing; the control only follows whether homing is possible
    MenuOnly,
    HomeAll,
    HomeAxis(AxisLetter),
    UnhomeAxis(AxisLetter),
}

impl HomeMethod {
    /// Interpret a variant segment: `""`, `"all"`, an axis letter or
    /// `"unhome_<axis>"`.
    pub fn from_variant(variant: &str) -> Result<Self, HandlerError> {
        match variant {
            "" => Ok(HomeMethod::MenuOnly),
            "all" => Ok(HomeMethod::HomeAll),
            v if v.starts_with(UNHOME_PREFIX) => {
                Ok(HomeMethod::UnhomeAxis(AxisLetter::parse(&v[UNHOME_PREFIX.len()..])?))
            }
            v if v.chars().count() == 1 => Ok(HomeMethod::HomeAxis(AxisLetter::parse(v)?)),
            v => Err(HandlerError::UnsupportedVariant {
                handler: HandlerKey::Home,
                variant: v.to_string(),
            }),
        }
    }

    /// Operation selector, `None` for menu-only controls
    pub fn selector(self) -> Option<&'static str> {
        match self {
            HomeMethod::MenuOnly => None,
            HomeMethod::HomeAll => Some("homeAll"),
            HomeMethod::HomeAxis(_) => Some("homeAxis"),
            HomeMethod::UnhomeAxis(_) => Some("unhomeAxis"),
        }
    }

    /// The variant segment that selects this method
    pub fn variant(self) -> String {
        match self {
            HomeMethod::MenuOnly => String::new(),
            HomeMethod::HomeAll => "all".to_string(),
            HomeMethod::HomeAxis(axis) => axis.to_string(),
            HomeMethod::UnhomeAxis(axis) => format!("{}{}", UNHOME_PREFIX, axis),
        }
    }

    fn axis(self) -> Option<AxisLetter> {
        match self {
            HomeMethod::HomeAxis(axis) | HomeMethod::UnhomeAxis(axis) => Some(axis),
            _ => None,
        }
    }
}

/// Homes, unhomes, or tracks homing availability
pub struct HomeHandler {
    ctx: HandlerContext,
    control: Control,
    method: HomeMethod,
    variant: String,
}

impl HomeHandler {
    pub fn new(ctx: &HandlerContext, control: Control, method: HomeMethod) -> Self {
        Self {
            ctx: ctx.clone(),
            control,
            variant: method.variant(),
            method,
        }
    }

    pub(crate) fn create(
        ctx: &HandlerContext,
        control: Control,
        variant: &str,
    ) -> Result<Rc<dyn Handler>, HandlerError> {
        let method = HomeMethod::from_variant(variant)?;
        if let Some(axis) = method.axis() {
            if !ctx.status.axis_letters().contains(&axis) {
                return Err(CommandError::AxisNotConfigured {
                    axis: axis.to_string(),
                }
                .into());
            }
        }
        Ok(Rc::new(Self::new(ctx, control, method)))
    }

    pub fn home_method(&self) -> HomeMethod {
        self.method
    }
}

impl Handler for HomeHandler {
    fn key(&self) -> HandlerKey {
        HandlerKey::Home
    }

    fn method(&self) -> Option<&'static str> {
        self.method.selector()
    }

    fn variant(&self) -> &str {
        &self.variant
    }

    fn control(&self) -> &Control {
        &self.control
    }

    fn activate(&self) {
        let commands = &self.ctx.commands;
        let (label, result) = match self.method {
            HomeMethod::MenuOnly => return,
            HomeMethod::HomeAll => ("home all", commands.home_all()),
            HomeMethod::HomeAxis(axis) => ("home axis", commands.home_axis(axis)),
            HomeMethod::UnhomeAxis(axis) => ("unhome axis", commands.unhome_axis(axis)),
        };
        if let Err(e) = result {
            self.ctx.report_failure(label, &e);
        }
    }

    fn refresh(&self) {
        let status = &self.ctx.status;
        let enabled = match self.method {
            HomeMethod::UnhomeAxis(axis) => status.is_homed(axis),
            _ => status.is_homing_possible(),
        };
        self.control.set_enabled(enabled);
    }
}

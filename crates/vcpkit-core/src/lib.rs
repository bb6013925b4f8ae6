//! # VCPKit Core
//!
//! Core types and traits for VCPKit.
//! Provides the machine vocabulary, the status and command abstractions the
//! front end is wired against, and the event bus that carries live changes.

pub mod command;
pub mod error;
pub mod event_bus;
pub mod machine;
pub mod status;
pub mod types;

pub use command::{CommandApi, SimulatedMachine};

pub use error::{CommandError, Error, Result};

pub use event_bus::{
    AppEvent, ErrorEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter,
    FileEvent, MachineEvent, SubscriptionId,
};

pub use machine::{canonical_axes, AxisLetter, JogSign, ProgramState, AXIS_ORDER};

pub use status::{LiveStatus, StatusFacade};

pub use types::{shared, Shared};

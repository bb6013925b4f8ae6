//! # Event Bus Module
//!
//! Publish/subscribe channel between the machine side and the front end.
//!
//! - Publishers emit typed events without knowing subscribers
//! - Synchronous subscribers filter by category and run on the publishing thread
//! - Receivers from [`EventBus::receiver`] let another thread (the UI thread)
//!   drain events at its own pace
//!
//! There is no global instance; the bus is created once at startup and passed
//! to whoever needs it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vcpkit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, FileEvent};
//!
//! let bus = Arc::new(EventBus::new());
//! let id = bus.subscribe(EventFilter::Categories(vec![EventCategory::File]), |event| {
//!     println!("{}", event.description());
//! });
//! bus.publish(AppEvent::File(FileEvent::ReloadRequested)).ok();
//! bus.unsubscribe(id);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;

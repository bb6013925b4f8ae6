//! # VCPKit UI
//!
//! Toolkit-neutral main window for VCPKit: a control and menu tree, the
//! naming convention that lets controls bind themselves to handlers, the
//! generated recent-files and homing menus, and keyboard jogging.
//!
//! Everything here lives on the UI thread. Machine status arrives through
//! the [`UiDispatcher`], which marshals events from the shared bus.

pub mod binder;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod homing_menu;
pub mod jog_keys;
pub mod layout;
pub mod main_window;
pub mod menu;
pub mod naming;
pub mod recent_files;
pub mod registry;

pub use binder::{ActionBinder, BindReport, Binding, Bindings};
pub use control::{plain_text, Control, ControlId, ControlState, WeakControl};
pub use dispatch::{LocalSubscriptionId, UiDispatcher};
pub use error::{BindingError, HandlerError, LayoutError, NameError};
pub use handlers::{FileChooser, Handler, HandlerContext, HandlerFactory, HandlerKey};
pub use homing_menu::HomingMenu;
pub use jog_keys::{jog_mapping, JogKeyForwarder, Key, KeyEvent, KeyOutcome};
pub use layout::{EntrySpec, MenuLayout, MenuSpec, HOMING_MENU, RECENT_FILES_MENU};
pub use main_window::{
    ExitPrompt, MessageLevel, StatusBar, StatusMessage, VcpMainWindow, EXIT_MESSAGE, EXIT_TITLE,
};
pub use menu::{Menu, MenuBar, MenuEntry};
pub use naming::{NamingConvention, ParsedName};
pub use recent_files::{entry_label, RecentFilesMenu, StalePolicy};
pub use registry::HandlerRegistry;

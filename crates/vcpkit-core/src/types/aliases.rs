//! Type aliases for the shared-state shapes used across crates.
//!
//! The front end is single-threaded, so UI state is shared with
//! `Rc<RefCell<T>>`; anything touched by the machine side uses `Arc`.
//!
//! ```rust,ignore
//! use vcpkit_core::types::*;
//!
//! let status_bar: Shared<StatusBar> = shared(StatusBar::new());
//! status_bar.borrow_mut().set_machine_status("Idle");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a value for single-threaded sharing.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

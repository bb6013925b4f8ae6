//! Triggerable controls
//!
//! A [`Control`] is the toolkit-neutral stand-in for a menu action or button:
//! a named, shared handle carrying display state and a list of trigger
//! listeners. Clones refer to the same control.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a control for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    fn next() -> Self {
        Self(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display state of a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// Label, may contain a `&` mnemonic marker
    pub text: String,
    pub enabled: bool,
    pub visible: bool,
    pub checkable: bool,
    pub checked: bool,
    /// Opaque payload, e.g. the full path behind a recent-file entry
    pub data: Option<String>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            text: String::new(),
            enabled: true,
            visible: true,
            checkable: false,
            checked: false,
            data: None,
        }
    }
}

type TriggerListener = Rc<dyn Fn(&Control)>;

struct ControlInner {
    id: ControlId,
    name: String,
    state: RefCell<ControlState>,
    listeners: RefCell<Vec<TriggerListener>>,
}

/// Shared handle to a triggerable control.
#[derive(Clone)]
pub struct Control(Rc<ControlInner>);

/// Non-owning reference to a [`Control`].
#[derive(Clone)]
pub struct WeakControl(Weak<ControlInner>);

impl WeakControl {
    pub fn upgrade(&self) -> Option<Control> {
        self.0.upgrade().map(Control)
    }
}

impl Control {
    /// Create a control with a declared name; an empty name is allowed
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(ControlInner {
            id: ControlId::next(),
            name: name.into(),
            state: RefCell::new(ControlState::default()),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Set the label
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Make the control a toggle
    pub fn with_checkable(self, checkable: bool) -> Self {
        self.set_checkable(checkable);
        self
    }

    pub fn id(&self) -> ControlId {
        self.0.id
    }

    /// The declared name used for discovery
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn downgrade(&self) -> WeakControl {
        WeakControl(Rc::downgrade(&self.0))
    }

    /// Snapshot of the display state
    pub fn state(&self) -> ControlState {
        self.0.state.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.0.state.borrow().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.state.borrow_mut().text = text.into();
    }

    pub fn is_enabled(&self) -> bool {
        self.0.state.borrow().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.0.state.borrow_mut().enabled = enabled;
    }

    pub fn is_visible(&self) -> bool {
        self.0.state.borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.state.borrow_mut().visible = visible;
    }

    pub fn is_checkable(&self) -> bool {
        self.0.state.borrow().checkable
    }

    pub fn set_checkable(&self, checkable: bool) {
        let mut state = self.0.state.borrow_mut();
        state.checkable = checkable;
        if !checkable {
            state.checked = false;
        }
    }

    pub fn is_checked(&self) -> bool {
        self.0.state.borrow().checked
    }

    /// Set the checked state without triggering; ignored unless checkable
    pub fn set_checked(&self, checked: bool) {
        let mut state = self.0.state.borrow_mut();
        if state.checkable {
            state.checked = checked;
        }
    }

    pub fn data(&self) -> Option<String> {
        self.0.state.borrow().data.clone()
    }

    pub fn set_data(&self, data: Option<String>) {
        self.0.state.borrow_mut().data = data;
    }

    /// Register a trigger listener. Listeners run in registration order.
    pub fn connect_triggered<F>(&self, listener: F)
    where
        F: Fn(&Control) + 'static,
    {
        self.0.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Activate the control as a user would.
    ///
    /// Disabled or hidden controls do not trigger. A checkable control flips
    /// its checked state before listeners run. Returns whether it fired.
    pub fn trigger(&self) -> bool {
        {
            let mut state = self.0.state.borrow_mut();
            if !state.enabled || !state.visible {
                return false;
            }
            if state.checkable {
                state.checked = !state.checked;
            }
        }

        // Listeners may touch this control, so run them from a snapshot.
        let listeners: Vec<TriggerListener> = self.0.listeners.borrow().clone();
        for listener in listeners {
            listener(self);
        }
        true
    }
}

impl PartialEq for Control {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Control {}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("state", &*self.0.state.borrow())
            .finish()
    }
}

/// Strip `&` mnemonic markers from a label; `&&` is a literal ampersand.
pub fn plain_text(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            if chars.peek() == Some(&'&') {
                out.push('&');
                chars.next();
            }
            continue;
        }
        out.push(c);
    }
    out
}

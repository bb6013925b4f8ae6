//! Convention-based action binding
//!
//! [`ActionBinder`] walks every menu of a window once, picks out the controls
//! whose names follow the [`NamingConvention`], builds the matching handler
//! and keeps the result as a [`Binding`]. Failures are logged and reported,
//! never fatal: an unbindable control simply stays inert.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

use crate::control::{Control, ControlId};
use crate::error::{BindingError, NameError};
use crate::handlers::{attach, Handler, HandlerContext, HandlerKey};
use crate::menu::{MenuBar, MenuEntry};
use crate::naming::NamingConvention;
use crate::registry::HandlerRegistry;

/// A control coupled to its handler
#[derive(Clone)]
pub struct Binding {
    control: Control,
    key: HandlerKey,
    method: Option<&'static str>,
    variant: String,
    handler: Rc<dyn Handler>,
}

impl Binding {
    pub fn new(handler: Rc<dyn Handler>) -> Self {
        Self {
            control: handler.control().clone(),
            key: handler.key(),
            method: handler.method(),
            variant: handler.variant().to_string(),
            handler,
        }
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn key(&self) -> HandlerKey {
        self.key
    }

    pub fn method(&self) -> Option<&'static str> {
        self.method
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn handler(&self) -> &Rc<dyn Handler> {
        &self.handler
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("control", &self.control.name())
            .field("key", &self.key)
            .field("method", &self.method)
            .field("variant", &self.variant)
            .finish()
    }
}

/// What happened during a discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub bound: usize,
    /// Controls reached more than once; bound on first sight only
    pub duplicates: usize,
    /// Names with the discovery prefix but no handler segment
    pub malformed: Vec<String>,
    pub failures: Vec<BindingError>,
}

/// Bindings retained for the lifetime of a window
#[derive(Debug, Default)]
pub struct Bindings {
    items: Vec<Binding>,
    report: BindReport,
}

impl Bindings {
    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn report(&self) -> &BindReport {
        &self.report
    }

    /// Binding for a control name, if it was bound
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.items.iter().find(|b| b.control.name() == name)
    }

    /// Number of bindings held for a control
    pub fn count_for(&self, id: ControlId) -> usize {
        self.items.iter().filter(|b| b.control.id() == id).count()
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Single-use discovery pass over a window's menus.
pub struct ActionBinder<'r> {
    registry: &'r HandlerRegistry,
    naming: NamingConvention,
    ctx: HandlerContext,
    seen: HashSet<ControlId>,
}

impl<'r> ActionBinder<'r> {
    pub fn new(registry: &'r HandlerRegistry, naming: NamingConvention, ctx: HandlerContext) -> Self {
        Self {
            registry,
            naming,
            ctx,
            seen: HashSet::new(),
        }
    }

    /// Leave these controls alone; they are bound elsewhere
    pub fn exclude(mut self, ids: impl IntoIterator<Item = ControlId>) -> Self {
        self.seen.extend(ids);
        self
    }

    /// Scan every menu, depth first in declared order, and bind what matches.
    pub fn bind(mut self, menu_bar: &MenuBar) -> Bindings {
        let started = Instant::now();
        let mut out = Bindings::default();

        for menu in menu_bar.all_menus() {
            for entry in menu.entries() {
                if let MenuEntry::Action(control) = entry {
                    self.bind_control(&control, &mut out);
                }
            }
        }

        out.report.bound = out.items.len();
        tracing::info!(
            "Bound {} controls in {:?} ({} failed)",
            out.report.bound,
            started.elapsed(),
            out.report.failures.len() + out.report.malformed.len()
        );
        out
    }

    fn bind_control(&mut self, control: &Control, out: &mut Bindings) {
        let name = control.name();
        let parsed = match self.naming.parse(name) {
            Ok(parsed) => parsed,
            Err(NameError::NotCandidate) => return,
            Err(NameError::Malformed { name }) => {
                tracing::warn!("Control {:?} has no handler segment, leaving it unbound", name);
                out.report.malformed.push(name);
                return;
            }
        };

        if !self.seen.insert(control.id()) {
            tracing::debug!("Control {:?} reached again, already handled", name);
            out.report.duplicates += 1;
            return;
        }

        let result = self
            .registry
            .resolve(&parsed.handler_key, name)
            .and_then(|(key, factory)| {
                factory(&self.ctx, control.clone(), &parsed.variant).map_err(|source| {
                    BindingError::Construction {
                        control: name.to_string(),
                        key,
                        source,
                    }
                })
            });

        match result {
            Ok(handler) => {
                attach(&handler, &self.ctx.dispatcher);
                tracing::debug!(
                    "Bound {:?} to {} handler (variant {:?})",
                    name,
                    handler.key(),
                    handler.variant()
                );
                out.items.push(Binding::new(handler));
            }
            Err(e) => {
                tracing::warn!("Could not connect control {:?}: {}", name, e);
                out.report.failures.push(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{fixture, Call};
    use crate::menu::Menu;

    fn menu_bar(controls: &[&Control]) -> MenuBar {
        let menu = Menu::new("menuTest", "Test");
        for control in controls {
            menu.add_action((*control).clone());
        }
        let mut bar = MenuBar::new();
        bar.add_menu(menu);
        bar
    }

    #[test]
    fn test_binds_candidates_only() {
        let fx = fixture();
        let registry = HandlerRegistry::builtin();
        let home = Control::new("action_Home_x");
        let exit = Control::new("actionExit");
        let bar = menu_bar(&[&home, &exit]);

        let bindings = ActionBinder::new(&registry, NamingConvention::default(), fx.ctx.clone())
            .bind(&bar);
        assert_eq!(bindings.len(), 1);
        let binding = bindings.get("action_Home_x").unwrap();
        assert_eq!(binding.key(), HandlerKey::Home);
        assert_eq!(binding.variant(), "x");
        assert_eq!(binding.method(), Some("homeAxis"));
        assert!(bindings.report().failures.is_empty());
        assert_eq!(exit.listener_count(), 0);
    }

    #[test]
    fn test_failures_do_not_stop_the_scan() {
        let fx = fixture();
        let registry = HandlerRegistry::builtin();
        let unknown = Control::new("action_Spindle_on");
        let malformed = Control::new("action_");
        let bad_axis = Control::new("action_Home_q");
        let good = Control::new("action_Home_all");
        let bar = menu_bar(&[&unknown, &malformed, &bad_axis, &good]);

        let bindings = ActionBinder::new(&registry, NamingConvention::default(), fx.ctx.clone())
            .bind(&bar);
        assert_eq!(bindings.len(), 1);
        let report = bindings.report();
        assert_eq!(report.malformed, vec!["action_".to_string()]);
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0], BindingError::UnknownHandler { .. }));
        assert!(matches!(
            report.failures[1],
            BindingError::Construction {
                key: HandlerKey::Home,
                ..
            }
        ));
    }

    #[test]
    fn test_control_in_two_menus_bound_once() {
        let fx = fixture();
        let registry = HandlerRegistry::builtin();
        let shared = Control::new("action_Home_all");
        let first = Menu::new("a", "A");
        first.add_action(shared.clone());
        let second = Menu::new("b", "B");
        second.add_action(shared.clone());
        let mut bar = MenuBar::new();
        bar.add_menu(first);
        bar.add_menu(second);

        let bindings = ActionBinder::new(&registry, NamingConvention::default(), fx.ctx.clone())
            .bind(&bar);
        assert_eq!(bindings.count_for(shared.id()), 1);
        assert_eq!(bindings.report().duplicates, 1);

        shared.trigger();
        assert_eq!(fx.commands.take(), vec![Call::HomeAll]);
    }

    #[test]
    fn test_excluded_controls_are_skipped() {
        let fx = fixture();
        let registry = HandlerRegistry::builtin();
        let home = Control::new("action_Home_all");
        let bar = menu_bar(&[&home]);

        let bindings = ActionBinder::new(&registry, NamingConvention::default(), fx.ctx.clone())
            .exclude([home.id()])
            .bind(&bar);
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_separators_and_submenus_skipped() {
        let fx = fixture();
        let registry = HandlerRegistry::builtin();
        let top = Menu::new("menuTop", "Top");
        top.add_separator();
        let sub = Menu::new("menuSub", "Sub");
        sub.add_action(Control::new("action_Machine_estop"));
        top.add_submenu(sub);
        let mut bar = MenuBar::new();
        bar.add_menu(top);

        let bindings = ActionBinder::new(&registry, NamingConvention::default(), fx.ctx.clone())
            .bind(&bar);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.iter().next().unwrap().key(), HandlerKey::Machine);
    }
}

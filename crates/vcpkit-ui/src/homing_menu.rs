//! Homing menu
//!
//! Built once from the configured axes: "Home &All" followed by one
//! "Home &<AXIS>" entry per axis in canonical order. The menu itself is bound
//! to a menu-only home handler so it greys out when homing is impossible.

use std::rc::Rc;

use vcpkit_core::canonical_axes;

use crate::binder::Binding;
use crate::control::{Control, ControlId};
use crate::handlers::{attach, Handler, HandlerContext, HomeHandler, HomeMethod};
use crate::menu::Menu;

pub struct HomingMenu {
    menu: Menu,
    menu_binding: Binding,
    entries: Vec<Binding>,
}

fn bind(ctx: &HandlerContext, control: Control, method: HomeMethod) -> Binding {
    let handler: Rc<dyn Handler> = Rc::new(HomeHandler::new(ctx, control, method));
    attach(&handler, &ctx.dispatcher);
    Binding::new(handler)
}

impl HomingMenu {
    /// Take over `menu`, replacing its design-time entries
    pub fn install(menu: &Menu, ctx: &HandlerContext) -> Self {
        menu.clear();

        let menu_binding = bind(ctx, menu.control().clone(), HomeMethod::MenuOnly);

        let mut entries = Vec::new();
        let all = Control::new("homeAll").with_text("Home &All");
        menu.add_action(all.clone());
        entries.push(bind(ctx, all, HomeMethod::HomeAll));

        for axis in canonical_axes(ctx.status.axis_letters()) {
            let control =
                Control::new(format!("home{}", axis.upper())).with_text(format!("Home &{}", axis.upper()));
            menu.add_action(control.clone());
            entries.push(bind(ctx, control, HomeMethod::HomeAxis(axis)));
        }

        tracing::debug!("Homing menu ready with {} entries", entries.len());
        Self {
            menu: menu.clone(),
            menu_binding,
            entries,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Binding that tracks the menu's own enabled state
    pub fn menu_binding(&self) -> &Binding {
        &self.menu_binding
    }

    /// Entry bindings in menu order
    pub fn entries(&self) -> &[Binding] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Every control this menu bound, including the menu itself
    pub fn control_ids(&self) -> Vec<ControlId> {
        std::iter::once(&self.menu_binding)
            .chain(&self.entries)
            .map(|b| b.control().id())
            .collect()
    }
}

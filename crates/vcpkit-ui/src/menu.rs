//! Menus and the menu bar
//!
//! The window's control tree. Menus hold ordered entries that are actions,
//! separators or submenus; the tree is mutable at runtime so the recent-files
//! and homing menus can be repopulated after the layout is loaded.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::control::Control;

/// One slot in a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Action(Control),
    Separator,
    Submenu(Menu),
}

struct MenuInner {
    name: String,
    control: Control,
    entries: RefCell<Vec<MenuEntry>>,
}

/// Shared handle to a menu.
#[derive(Clone)]
pub struct Menu(Rc<MenuInner>);

impl Menu {
    /// Create an empty menu; `name` is what lookups match on
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        let name = name.into();
        Self(Rc::new(MenuInner {
            control: Control::new(String::new()).with_text(title),
            name,
            entries: RefCell::new(Vec::new()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn title(&self) -> String {
        self.0.control.text()
    }

    /// The control representing the menu itself in its parent
    pub fn control(&self) -> &Control {
        &self.0.control
    }

    pub fn add_action(&self, control: Control) {
        self.0.entries.borrow_mut().push(MenuEntry::Action(control));
    }

    pub fn add_separator(&self) {
        self.0.entries.borrow_mut().push(MenuEntry::Separator);
    }

    pub fn add_submenu(&self, menu: Menu) {
        self.0.entries.borrow_mut().push(MenuEntry::Submenu(menu));
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.0.entries.borrow_mut().clear();
    }

    /// Snapshot of the entries in order
    pub fn entries(&self) -> Vec<MenuEntry> {
        self.0.entries.borrow().clone()
    }

    /// Action entries only, in order
    pub fn actions(&self) -> Vec<Control> {
        self.0
            .entries
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Action(control) => Some(control.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// This menu followed by all nested submenus, depth first
    pub fn descendants(&self) -> Vec<Menu> {
        let mut out = vec![self.clone()];
        for entry in self.entries() {
            if let MenuEntry::Submenu(sub) = entry {
                out.extend(sub.descendants());
            }
        }
        out
    }

    /// Find an action by name in this menu or any submenu
    pub fn find_action(&self, name: &str) -> Option<Control> {
        self.descendants()
            .into_iter()
            .flat_map(|menu| menu.actions())
            .find(|control| control.name() == name)
    }
}

impl PartialEq for Menu {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Menu {}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("name", &self.0.name)
            .field("title", &self.title())
            .field("entries", &self.0.entries.borrow().len())
            .finish()
    }
}

/// Top-level menus of a window
#[derive(Debug, Clone, Default)]
pub struct MenuBar {
    menus: Vec<Menu>,
}

impl MenuBar {
    /// Create an empty menu bar
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_menu(&mut self, menu: Menu) {
        self.menus.push(menu);
    }

    /// Top-level menus in order
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Every menu in the tree, depth first
    pub fn all_menus(&self) -> Vec<Menu> {
        self.menus.iter().flat_map(Menu::descendants).collect()
    }

    /// Find a menu anywhere in the tree by name
    pub fn find_menu(&self, name: &str) -> Option<Menu> {
        self.all_menus().into_iter().find(|menu| menu.name() == name)
    }

    /// Find an action anywhere in the tree by name
    pub fn find_action(&self, name: &str) -> Option<Control> {
        self.menus.iter().find_map(|menu| menu.find_action(name))
    }
}

//! Menu layout descriptions
//!
//! A layout file declares the window's menus and their named controls; it is
//! the only place control names come from. TOML example:
//!
//! ```toml
//! [[menus]]
//! name = "menuMachine"
//! title = "&Machine"
//!
//! [[menus.entries]]
//! kind = "action"
//! name = "action_Machine_estop"
//! text = "Toggle &E-stop"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::control::Control;
use crate::error::LayoutError;
use crate::menu::{Menu, MenuBar};

/// Name of the host menu for recent files
pub const RECENT_FILES_MENU: &str = "menuRecentFiles";
/// Name of the host menu for homing entries
pub const HOMING_MENU: &str = "menuHoming";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLayout {
    #[serde(default)]
    pub menus: Vec<MenuSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSpec {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntrySpec {
    Action {
        name: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        checkable: bool,
    },
    Separator,
    Submenu(MenuSpec),
}

impl EntrySpec {
    fn action(name: &str, text: &str) -> Self {
        EntrySpec::Action {
            name: name.to_string(),
            text: text.to_string(),
            checkable: false,
        }
    }

    fn toggle(name: &str, text: &str) -> Self {
        EntrySpec::Action {
            name: name.to_string(),
            text: text.to_string(),
            checkable: true,
        }
    }
}

impl MenuSpec {
    fn new(name: &str, title: &str, entries: Vec<EntrySpec>) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            entries,
        }
    }

    fn build(&self) -> Menu {
        let menu = Menu::new(self.name.clone(), self.title.clone());
        for entry in &self.entries {
            match entry {
                EntrySpec::Action {
                    name,
                    text,
                    checkable,
                } => menu.add_action(
                    Control::new(name.clone())
                        .with_text(text.clone())
                        .with_checkable(*checkable),
                ),
                EntrySpec::Separator => menu.add_separator(),
                EntrySpec::Submenu(sub) => menu.add_submenu(sub.build()),
            }
        }
        menu
    }
}

impl MenuLayout {
    /// Read a layout from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(LayoutError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(content)?)
    }

    /// Create a fresh control tree from this description
    pub fn build(&self) -> MenuBar {
        let mut bar = MenuBar::new();
        for spec in &self.menus {
            bar.add_menu(spec.build());
        }
        bar
    }

    /// The stock layout: File, Machine, Program and Jog menus
    pub fn builtin() -> Self {
        use EntrySpec as E;

        let recent = MenuSpec::new(
            RECENT_FILES_MENU,
            "Recent &Files",
            vec![E::action("", "(no recent files)")],
        );
        let homing = MenuSpec::new(
            HOMING_MENU,
            "&Homing",
            vec![E::action("", "Home (generated)")],
        );

        let file = MenuSpec::new(
            "menuFile",
            "&File",
            vec![
                E::action("action_Program_open", "&Open..."),
                E::Submenu(recent),
                E::action("action_Program_reload", "&Reload"),
                E::Separator,
                E::action("actionExit", "E&xit"),
            ],
        );

        let mut machine_entries = vec![
            E::toggle("action_Machine_estop", "Toggle &E-stop"),
            E::toggle("action_Machine_power", "Toggle &Power"),
            E::Separator,
            E::Submenu(homing),
        ];
        machine_entries.extend(
            ['x', 'y', 'z']
                .iter()
                .map(|a| {
                    E::action(
                        &format!("action_Home_unhome_{}", a),
                        &format!("Unhome {}", a.to_ascii_uppercase()),
                    )
                }),
        );
        let machine = MenuSpec::new("menuMachine", "&Machine", machine_entries);

        let program = MenuSpec::new(
            "menuProgram",
            "&Program",
            vec![
                E::action("action_Program_run", "&Run"),
                E::action("action_Program_pause", "&Pause"),
                E::action("action_Program_resume", "Re&sume"),
                E::Separator,
                E::action("action_Program_abort", "&Abort"),
            ],
        );

        let jog = MenuSpec::new(
            "menuJog",
            "&Jog",
            ['x', 'y', 'z']
                .iter()
                .flat_map(|a| {
                    let upper = a.to_ascii_uppercase();
                    [
                        E::toggle(&format!("action_Jog_{}_pos", a), &format!("Jog {}+", upper)),
                        E::toggle(&format!("action_Jog_{}_neg", a), &format!("Jog {}-", upper)),
                    ]
                })
                .collect(),
        );

        Self {
            menus: vec![file, machine, program, jog],
        }
    }
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Recent files menu
//!
//! Owns a fixed set of pre-allocated entries in the host menu and relabels
//! them whenever the status store publishes a new recent-files list.

use std::path::Path;
use std::rc::Rc;

use vcpkit_core::{AppEvent, EventCategory, EventFilter, FileEvent};

use crate::control::Control;
use crate::dispatch::{LocalSubscriptionId, UiDispatcher};
use crate::handlers::{report_failure, HandlerContext};
use crate::menu::Menu;

/// What happens to entries past the end of a shorter list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Leave them exactly as they were
    #[default]
    Retain,
    /// Hide them and forget their path
    Hide,
}

impl StalePolicy {
    pub fn from_hide_flag(hide: bool) -> Self {
        if hide {
            StalePolicy::Hide
        } else {
            StalePolicy::Retain
        }
    }
}

/// Menu label for the entry at `index`
pub fn entry_label(index: usize, path: &str) -> String {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("&{} {}", index + 1, name)
}

fn apply(entries: &[Control], paths: &[String], policy: StalePolicy) {
    for (i, entry) in entries.iter().enumerate() {
        match paths.get(i) {
            Some(path) => {
                entry.set_text(entry_label(i, path));
                entry.set_data(Some(path.clone()));
                entry.set_visible(true);
            }
            None if policy == StalePolicy::Hide => {
                entry.set_visible(false);
                entry.set_data(None);
            }
            None => {}
        }
    }
}

pub struct RecentFilesMenu {
    menu: Menu,
    entries: Rc<[Control]>,
    policy: StalePolicy,
    dispatcher: Rc<UiDispatcher>,
    subscription: LocalSubscriptionId,
}

impl RecentFilesMenu {
    /// Take over `menu`: drop its design-time entries, add `max_recent_files`
    /// hidden entries, show the current list and follow future changes.
    pub fn install(menu: &Menu, ctx: &HandlerContext, policy: StalePolicy) -> Self {
        menu.clear();

        let count = ctx.status.max_recent_files();
        let entries: Rc<[Control]> = (0..count)
            .map(|i| {
                let entry = Control::new(format!("recentFile{}", i + 1));
                entry.set_visible(false);
                let commands = ctx.commands.clone();
                let bus = ctx.bus.clone();
                entry.connect_triggered(move |control| {
                    let Some(path) = control.data() else {
                        return;
                    };
                    if let Err(e) = commands.load_program(&path, true) {
                        report_failure(&bus, "open recent file", &e);
                    }
                });
                menu.add_action(entry.clone());
                entry
            })
            .collect();

        apply(&entries, &ctx.status.recent_files(), policy);

        let subscription = {
            let entries = entries.clone();
            ctx.dispatcher.subscribe(
                EventFilter::Categories(vec![EventCategory::File]),
                move |event| {
                    if let AppEvent::File(FileEvent::RecentFilesChanged { files }) = event {
                        apply(&entries, files, policy);
                    }
                },
            )
        };

        tracing::debug!("Recent files menu ready with {} entries", count);
        Self {
            menu: menu.clone(),
            entries,
            policy,
            dispatcher: ctx.dispatcher.clone(),
            subscription,
        }
    }

    /// Relabel the entries from `paths`, most recent first
    pub fn rebuild(&self, paths: &[String]) {
        apply(&self.entries, paths, self.policy);
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn entries(&self) -> &[Control] {
        &self.entries
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_visible()).count()
    }

    pub fn subscription(&self) -> LocalSubscriptionId {
        self.subscription
    }
}

impl Drop for RecentFilesMenu {
    fn drop(&mut self) {
        self.dispatcher.unsubscribe(self.subscription);
    }
}

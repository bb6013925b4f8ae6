//! Application wiring
//!
//! Builds the status store, the simulated machine and the main window from a
//! [`Config`], and logs every bus event for the lifetime of the session.

use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use vcpkit_core::{
    AppEvent, EventBus, EventFilter, LiveStatus, SimulatedMachine, StatusFacade, SubscriptionId,
};
use vcpkit_settings::Config;
use vcpkit_ui::{FileChooser, HandlerContext, HandlerRegistry, MenuLayout, UiDispatcher, VcpMainWindow};

/// A running VCPKit session
pub struct App {
    status: Arc<LiveStatus>,
    window: VcpMainWindow,
    event_log: SubscriptionId,
}

fn log_event(event: AppEvent) {
    match event {
        AppEvent::Error(_) => tracing::error!("{}", event.description()),
        _ => tracing::debug!("{}", event.description()),
    }
}

impl App {
    pub fn new(config: &Config, chooser: Option<Rc<dyn FileChooser>>) -> anyhow::Result<Self> {
        let axes = config.machine.axes().context("Invalid machine configuration")?;

        let bus = Arc::new(EventBus::new());
        let event_log = bus.subscribe(EventFilter::All, log_event);
        let status = Arc::new(
            LiveStatus::new(bus.clone(), axes, config.files.max_recent_files)
                .with_recent_files(config.files.recent_files.clone()),
        );
        let machine = Rc::new(SimulatedMachine::new(status.clone()));
        let dispatcher = Rc::new(UiDispatcher::new(&bus));

        let mut ctx = HandlerContext::new(machine, status.clone(), bus, dispatcher);
        if let Some(chooser) = chooser {
            ctx = ctx.with_file_chooser(chooser);
        }

        let layout = match &config.window.layout_file {
            Some(path) => MenuLayout::from_file(path)
                .with_context(|| format!("Failed to load menu layout {}", path.display()))?,
            None => MenuLayout::builtin(),
        };

        let window = VcpMainWindow::new(config, layout.build(), &HandlerRegistry::builtin(), ctx);
        Ok(Self {
            status,
            window,
            event_log,
        })
    }

    pub fn status(&self) -> &Arc<LiveStatus> {
        &self.status
    }

    pub fn window(&self) -> &VcpMainWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut VcpMainWindow {
        &mut self.window
    }

    /// Current recent-files list, for saving back to the settings
    pub fn recent_files(&self) -> Vec<String> {
        self.status.recent_files()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.status.bus().unsubscribe(self.event_log);
    }
}

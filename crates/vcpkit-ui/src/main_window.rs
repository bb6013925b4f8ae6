//! Main Window
//!
//! Owns the control tree, binds it to handlers, hosts the recent-files and
//! homing menus, forwards jog keys and keeps a status bar model.
//!
//! Construction order matters: the splash load is deferred first, then the
//! generated menus are installed, and the discovery pass runs last so that
//! every control exists before anything is bound.

use std::cell::Ref;
use std::path::Path;
use std::rc::Rc;

use vcpkit_core::{
    shared, AppEvent, ErrorEvent, EventCategory, EventFilter, FileEvent, Shared, StatusFacade,
};
use vcpkit_settings::{Config, WindowPosition, WindowSize};

use crate::binder::{ActionBinder, Bindings};
use crate::control::{Control, ControlId};
use crate::dispatch::UiDispatcher;
use crate::handlers::{report_failure, HandlerContext};
use crate::homing_menu::HomingMenu;
use crate::jog_keys::{JogKeyForwarder, KeyEvent, KeyOutcome};
use crate::layout::{HOMING_MENU, RECENT_FILES_MENU};
use crate::menu::MenuBar;
use crate::naming::NamingConvention;
use crate::recent_files::{RecentFilesMenu, StalePolicy};
use crate::registry::HandlerRegistry;

pub const EXIT_TITLE: &str = "Exit VCPKit?";
pub const EXIT_MESSAGE: &str = "Are you sure you want to exit?";

/// Asks the user to confirm closing the window.
pub trait ExitPrompt {
    fn confirm_exit(&self, title: &str, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Status bar message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: MessageLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Warning,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
        }
    }
}

/// Window status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    pub message: StatusMessage,
    /// E-stop, power or program state
    pub machine_status: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            message: StatusMessage::info("Ready"),
            machine_status: String::new(),
        }
    }

    pub fn set_message(&mut self, message: StatusMessage) {
        self.message = message;
    }

    pub fn set_machine_status(&mut self, status: impl Into<String>) {
        self.machine_status = status.into();
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

fn machine_status_text(status: &dyn StatusFacade) -> String {
    if status.is_estop_active() {
        "E-stop".to_string()
    } else if !status.is_powered_on() {
        "Off".to_string()
    } else {
        status.program_state().to_string()
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// The machine-control main window
pub struct VcpMainWindow {
    title: String,
    prompt_at_exit: bool,
    menu_bar_visible: bool,
    status_bar_visible: bool,
    maximized: bool,
    fullscreen: bool,
    size: Option<WindowSize>,
    position: Option<WindowPosition>,
    menu_bar: MenuBar,
    status_bar: Shared<StatusBar>,
    ctx: HandlerContext,
    bindings: Bindings,
    recent_files: Option<RecentFilesMenu>,
    homing: Option<HomingMenu>,
    jog_keys: JogKeyForwarder,
}

impl VcpMainWindow {
    /// Build the window around an already constructed control tree.
    pub fn new(
        config: &Config,
        menu_bar: MenuBar,
        registry: &HandlerRegistry,
        ctx: HandlerContext,
    ) -> Self {
        let options = &config.window;
        tracing::info!("Creating main window {:?}", options.title);

        let status_bar = shared(StatusBar::new());
        status_bar
            .borrow_mut()
            .set_machine_status(machine_status_text(ctx.status.as_ref()));
        Self::connect_status_bar(&status_bar, &ctx);

        Self::load_splash(&ctx, config.files.splash_program.as_deref());

        let recent_files = match menu_bar.find_menu(RECENT_FILES_MENU) {
            Some(menu) => Some(RecentFilesMenu::install(
                &menu,
                &ctx,
                StalePolicy::from_hide_flag(config.files.hide_stale_recent),
            )),
            None => {
                tracing::debug!("No {} menu, recent files disabled", RECENT_FILES_MENU);
                None
            }
        };

        let homing = match menu_bar.find_menu(HOMING_MENU) {
            Some(menu) => Some(HomingMenu::install(&menu, &ctx)),
            None => {
                tracing::debug!("No {} menu, homing menu disabled", HOMING_MENU);
                None
            }
        };

        let generated: Vec<ControlId> = homing
            .iter()
            .flat_map(HomingMenu::control_ids)
            .chain(
                recent_files
                    .iter()
                    .flat_map(|r| r.entries().iter().map(Control::id).collect::<Vec<_>>()),
            )
            .collect();

        let bindings = ActionBinder::new(
            registry,
            NamingConvention::from_settings(&config.binding),
            ctx.clone(),
        )
        .exclude(generated)
        .bind(&menu_bar);

        let report = bindings.report();
        let unbound = report.failures.len() + report.malformed.len();
        if unbound > 0 {
            status_bar.borrow_mut().set_message(StatusMessage::warning(format!(
                "{} controls could not be bound",
                unbound
            )));
        }

        Self {
            title: options.title.clone(),
            prompt_at_exit: options.prompt_at_exit,
            menu_bar_visible: !options.hide_menu_bar,
            status_bar_visible: !options.hide_status_bar,
            maximized: options.maximize,
            fullscreen: options.fullscreen,
            size: options.size,
            position: options.position,
            menu_bar,
            status_bar,
            jog_keys: JogKeyForwarder::new(ctx.commands.clone()),
            ctx,
            bindings,
            recent_files,
            homing,
        }
    }

    fn connect_status_bar(status_bar: &Shared<StatusBar>, ctx: &HandlerContext) {
        let status_bar = Rc::downgrade(status_bar);
        let status = ctx.status.clone();
        ctx.dispatcher.subscribe_while(
            EventFilter::Categories(vec![
                EventCategory::Machine,
                EventCategory::File,
                EventCategory::Error,
            ]),
            move |event| {
                let Some(status_bar) = status_bar.upgrade() else {
                    return false;
                };
                let mut bar = status_bar.borrow_mut();
                match event {
                    AppEvent::Error(ErrorEvent::CommandFailed { command, reason }) => {
                        bar.set_message(StatusMessage::error(format!(
                            "{} failed: {}",
                            command, reason
                        )));
                    }
                    AppEvent::File(FileEvent::ProgramLoaded { path }) => {
                        bar.set_message(StatusMessage::info(format!("Loaded {}", file_name(path))));
                    }
                    AppEvent::Machine(_) => {
                        bar.set_machine_status(machine_status_text(status.as_ref()));
                    }
                    _ => {}
                }
                true
            },
        );
    }

    /// Queue the startup program load for the first loop turn
    fn load_splash(ctx: &HandlerContext, splash: Option<&Path>) {
        let bus = ctx.bus.clone();
        if let Some(loaded) = ctx.status.loaded_program() {
            ctx.dispatcher.defer(move || {
                tracing::debug!("Reloading {} for views", loaded);
                if bus.publish(AppEvent::File(FileEvent::ReloadRequested)).is_err() {
                    tracing::trace!("No view listening for reload");
                }
            });
        } else if let Some(splash) = splash {
            let splash = splash.to_string_lossy().into_owned();
            let commands = ctx.commands.clone();
            ctx.dispatcher.defer(move || {
                if let Err(e) = commands.load_program(&splash, false) {
                    report_failure(&bus, "load splash program", &e);
                }
            });
        }
    }

    /// Whether the window may close; asks first when `prompt_at_exit` is set
    pub fn close_requested(&self, prompt: &dyn ExitPrompt) -> bool {
        if !self.prompt_at_exit {
            return true;
        }
        let confirmed = prompt.confirm_exit(EXIT_TITLE, EXIT_MESSAGE);
        if !confirmed {
            tracing::debug!("Exit cancelled");
        }
        confirmed
    }

    pub fn key_pressed(&self, event: &KeyEvent) -> KeyOutcome {
        self.jog_keys.key_pressed(event)
    }

    pub fn key_released(&self, event: &KeyEvent) -> KeyOutcome {
        self.jog_keys.key_released(event)
    }

    pub fn prompt_at_exit(&self) -> bool {
        self.prompt_at_exit
    }

    pub fn set_prompt_at_exit(&mut self, prompt: bool) {
        self.prompt_at_exit = prompt;
    }

    pub fn max_recent_files(&self) -> usize {
        self.ctx.status.max_recent_files()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_menu_bar_visible(&self) -> bool {
        self.menu_bar_visible
    }

    pub fn is_status_bar_visible(&self) -> bool {
        self.status_bar_visible
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
    }

    pub fn size(&self) -> Option<WindowSize> {
        self.size
    }

    pub fn position(&self) -> Option<WindowPosition> {
        self.position
    }

    pub fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn recent_files_menu(&self) -> Option<&RecentFilesMenu> {
        self.recent_files.as_ref()
    }

    pub fn homing_menu(&self) -> Option<&HomingMenu> {
        self.homing.as_ref()
    }

    pub fn status_bar(&self) -> Ref<'_, StatusBar> {
        self.status_bar.borrow()
    }

    pub fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    pub fn dispatcher(&self) -> &Rc<UiDispatcher> {
        &self.ctx.dispatcher
    }
}

use std::rc::Rc;
use std::sync::Arc;

use vcpkit_core::{AxisLetter, EventBus, LiveStatus, ProgramState, SimulatedMachine, StatusFacade};
use vcpkit_settings::Config;
use vcpkit_ui::{
    FileChooser, HandlerContext, HandlerRegistry, Key, KeyEvent, KeyOutcome, MenuLayout,
    MessageLevel, UiDispatcher, VcpMainWindow,
};

struct FixedChooser(&'static str);

impl FileChooser for FixedChooser {
    fn choose_program(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

struct Shop {
    status: Arc<LiveStatus>,
    window: VcpMainWindow,
}

impl Shop {
    fn trigger(&self, name: &str) -> bool {
        let control = self
            .window
            .menu_bar()
            .find_action(name)
            .unwrap_or_else(|| panic!("no control {name}"));
        let fired = control.trigger();
        self.window.dispatcher().pump();
        fired
    }
}

fn shop(config: &Config) -> Shop {
    let bus = Arc::new(EventBus::new());
    let status = Arc::new(LiveStatus::new(
        bus.clone(),
        config.machine.axes().unwrap(),
        config.files.max_recent_files,
    ));
    let machine = Rc::new(SimulatedMachine::new(status.clone()));
    let dispatcher = Rc::new(UiDispatcher::new(&bus));
    let ctx = HandlerContext::new(machine, status.clone(), bus, dispatcher)
        .with_file_chooser(Rc::new(FixedChooser("/jobs/bracket.ngc")));
    let window = VcpMainWindow::new(
        config,
        MenuLayout::builtin().build(),
        &HandlerRegistry::builtin(),
        ctx,
    );
    window.dispatcher().pump();
    Shop { status, window }
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.files.max_recent_files = 5;
    config
}

#[test]
fn builtin_layout_binds_cleanly() {
    let shop = shop(&small_config());
    let report = shop.window.bindings().report();

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert!(report.malformed.is_empty());
    assert_eq!(shop.window.homing_menu().unwrap().entry_count(), 4);
    assert_eq!(shop.window.recent_files_menu().unwrap().entries().len(), 5);
    assert_eq!(shop.window.status_bar().message.level, MessageLevel::Info);
}

#[test]
fn power_up_and_home_from_menu() {
    let shop = shop(&small_config());
    let home_all = shop.window.menu_bar().find_action("homeAll").unwrap();
    assert!(!home_all.is_enabled());
    assert_eq!(shop.window.status_bar().machine_status, "E-stop");

    assert!(shop.trigger("action_Machine_estop"));
    assert!(shop.trigger("action_Machine_power"));
    assert!(shop.status.is_powered_on());
    assert!(home_all.is_enabled());
    assert_eq!(shop.window.status_bar().machine_status, "Idle");

    assert!(shop.trigger("homeY"));
    assert!(shop.status.is_homed(AxisLetter::new('y').unwrap()));
    assert!(!shop.status.is_homed(AxisLetter::new('x').unwrap()));

    assert!(shop.trigger("homeAll"));
    for axis in shop.status.axis_letters() {
        assert!(shop.status.is_homed(axis));
    }
    let unhome_z = shop.window.menu_bar().find_action("action_Home_unhome_z").unwrap();
    assert!(unhome_z.is_enabled());
}

#[test]
fn open_program_lands_in_recent_files() {
    let shop = shop(&small_config());

    assert!(shop.trigger("action_Program_open"));
    assert_eq!(
        shop.status.loaded_program().as_deref(),
        Some("/jobs/bracket.ngc")
    );

    let recent = shop.window.recent_files_menu().unwrap();
    assert_eq!(recent.entries()[0].text(), "&1 bracket.ngc");
    assert!(recent.entries()[0].is_visible());
    assert_eq!(recent.visible_count(), 1);
    assert_eq!(
        shop.window.status_bar().message.text,
        "Loaded bracket.ngc"
    );
}

#[test]
fn failed_recent_load_reaches_status_bar() {
    let shop = shop(&small_config());
    shop.trigger("action_Machine_estop");
    shop.trigger("action_Machine_power");
    shop.trigger("action_Program_open");
    shop.trigger("action_Program_run");
    assert_eq!(shop.status.program_state(), ProgramState::Running);

    let entry = shop.window.recent_files_menu().unwrap().entries()[0].clone();
    entry.trigger();
    shop.window.dispatcher().pump();

    let bar = shop.window.status_bar();
    assert_eq!(bar.message.level, MessageLevel::Error);
    assert!(bar.message.text.contains("a program is running"), "{}", bar.message.text);
}

#[test]
fn arrow_keys_jog_the_machine() {
    let shop = shop(&small_config());
    shop.trigger("action_Machine_estop");
    shop.trigger("action_Machine_power");
    let mut events = shop.status.bus().receiver();

    assert_eq!(
        shop.window.key_pressed(&KeyEvent::new(Key::PageUp)),
        KeyOutcome::Forwarded
    );
    assert_eq!(
        shop.window.key_pressed(&KeyEvent::repeat(Key::PageUp)),
        KeyOutcome::IgnoredRepeat
    );
    assert_eq!(
        shop.window.key_released(&KeyEvent::new(Key::PageUp)),
        KeyOutcome::Forwarded
    );
    assert_eq!(
        shop.window.key_pressed(&KeyEvent::new(Key::Other("F1".into()))),
        KeyOutcome::Unhandled
    );

    let mut jogs = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let vcpkit_core::AppEvent::Machine(vcpkit_core::MachineEvent::Jog { axis, sign }) = event {
            jogs.push((axis.as_char(), sign));
        }
    }
    assert_eq!(
        jogs,
        vec![
            ('z', vcpkit_core::JogSign::Positive),
            ('z', vcpkit_core::JogSign::Stop)
        ]
    );
}

#[test]
fn seeded_recent_files_show_at_startup() {
    let mut config = small_config();
    config.files.recent_files = vec!["/jobs/a.ngc".into(), "/jobs/b.ngc".into()];
    let bus = Arc::new(EventBus::new());
    let status = Arc::new(
        LiveStatus::new(bus.clone(), config.machine.axes().unwrap(), 5)
            .with_recent_files(config.files.recent_files.clone()),
    );
    let dispatcher = Rc::new(UiDispatcher::new(&bus));
    let ctx = HandlerContext::new(
        Rc::new(SimulatedMachine::new(status.clone())),
        status,
        bus,
        dispatcher,
    )
    .with_file_chooser(Rc::new(FixedChooser("/jobs/c.ngc")));
    let window = VcpMainWindow::new(
        &config,
        MenuLayout::builtin().build(),
        &HandlerRegistry::builtin(),
        ctx,
    );

    let labels: Vec<String> = window
        .recent_files_menu()
        .unwrap()
        .entries()
        .iter()
        .filter(|e| e.is_visible())
        .map(|e| e.text())
        .collect();
    assert_eq!(labels, vec!["&1 a.ngc", "&2 b.ngc"]);
}

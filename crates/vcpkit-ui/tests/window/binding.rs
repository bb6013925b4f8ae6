use std::io;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use vcpkit_ui::{
    ActionBinder, Control, HandlerRegistry, Menu, MenuBar, NamingConvention,
};

use crate::common::{harness, Call};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with every log event written to a string
fn capture_logs(f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn bar_of(names: &[&str]) -> (MenuBar, Vec<Control>) {
    let top = Menu::new("menuTop", "Top");
    let nested = Menu::new("menuNested", "Nested");
    let mut controls = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let control = Control::new(*name);
        if i % 2 == 0 {
            top.add_action(control.clone());
        } else {
            nested.add_action(control.clone());
        }
        controls.push(control);
    }
    top.add_separator();
    top.add_submenu(nested);
    let mut bar = MenuBar::new();
    bar.add_menu(top);
    (bar, controls)
}

#[test]
fn every_known_candidate_gets_exactly_one_binding() {
    let h = harness("xyz", 5);
    let registry = HandlerRegistry::builtin();
    let (bar, controls) = bar_of(&[
        "action_Home_all",
        "action_Machine_power",
        "action_Jog_z_pos",
        "action_Program_abort",
        "action_Home_unhome_y",
    ]);

    let bindings = ActionBinder::new(&registry, NamingConvention::default(), h.ctx.clone())
        .bind(&bar);

    assert_eq!(bindings.len(), controls.len());
    for control in &controls {
        assert_eq!(bindings.count_for(control.id()), 1, "{}", control.name());
    }
}

#[test]
fn non_candidates_are_unbound_and_silent() {
    let h = harness("xyz", 5);
    let registry = HandlerRegistry::builtin();
    let (bar, controls) = bar_of(&["actionExit", "menuHelpAbout", "toolbar_Home_x", ""]);

    let logs = capture_logs(|| {
        let bindings = ActionBinder::new(&registry, NamingConvention::default(), h.ctx.clone())
            .bind(&bar);
        assert!(bindings.is_empty());
        for control in &controls {
            assert_eq!(bindings.count_for(control.id()), 0);
            assert_eq!(control.listener_count(), 0);
        }
    });

    for name in ["actionExit", "menuHelpAbout", "toolbar_Home_x"] {
        assert!(!logs.contains(name), "unexpected log for {name}: {logs}");
    }
}

#[test]
fn malformed_and_unknown_names_are_logged() {
    let h = harness("xyz", 5);
    let registry = HandlerRegistry::builtin();
    let (bar, _) = bar_of(&["action_", "action_Coolant_flood"]);

    let logs = capture_logs(|| {
        let bindings = ActionBinder::new(&registry, NamingConvention::default(), h.ctx.clone())
            .bind(&bar);
        assert!(bindings.is_empty());
        assert_eq!(bindings.report().malformed.len(), 1);
        assert_eq!(bindings.report().failures.len(), 1);
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("action_Coolant_flood"));
}

#[test]
fn bound_controls_forward_to_commands() {
    let h = harness("xyz", 5);
    let registry = HandlerRegistry::builtin();
    let (bar, controls) = bar_of(&["action_Home_all", "action_Home_y"]);
    let _bindings = ActionBinder::new(&registry, NamingConvention::default(), h.ctx.clone())
        .bind(&bar);

    for control in &controls {
        control.trigger();
    }
    assert_eq!(h.commands.take(), vec![Call::HomeAll, Call::HomeAxis('y')]);
}

const KNOWN: [&str; 5] = [
    "action_Home_all",
    "action_Home_x",
    "action_Machine_estop",
    "action_Jog_y_neg",
    "action_Program_run",
];

fn control_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(KNOWN.to_vec()).prop_map(str::to_string),
        "[a-z]{1,10}".prop_map(|s| format!("menu{}", s)),
        "[A-Za-z]{1,10}".prop_map(|s| format!("action{}", s)),
    ]
}

proptest! {
    #[test]
    fn binding_count_matches_candidacy(names in prop::collection::vec(control_name(), 0..12)) {
        let h = harness("xyz", 5);
        let registry = HandlerRegistry::builtin();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (bar, controls) = bar_of(&refs);

        let bindings = ActionBinder::new(&registry, NamingConvention::default(), h.ctx.clone())
            .bind(&bar);

        for control in &controls {
            let expected = usize::from(KNOWN.contains(&control.name()));
            prop_assert_eq!(bindings.count_for(control.id()), expected);
        }
    }
}

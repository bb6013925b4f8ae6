use std::rc::Rc;
use std::sync::{Arc, Mutex};

use vcpkit_core::{AppEvent, AxisLetter, MachineEvent};
use vcpkit_ui::{plain_text, HandlerContext, HandlerKey, HomingMenu, Menu, UiDispatcher};

use crate::common::{harness, Call, MutableAxes, Recorder};

#[test]
fn xyz_machine_gets_four_entries() {
    let h = harness("xyz", 5);
    let menu = Menu::new("menuHoming", "&Homing");
    let homing = HomingMenu::install(&menu, &h.ctx);

    let labels: Vec<String> = homing
        .entries()
        .iter()
        .map(|b| plain_text(&b.control().text()))
        .collect();
    assert_eq!(labels, vec!["Home All", "Home X", "Home Y", "Home Z"]);

    let shape: Vec<(HandlerKey, Option<&str>, &str)> = homing
        .entries()
        .iter()
        .map(|b| (b.key(), b.method(), b.variant()))
        .collect();
    assert_eq!(
        shape,
        vec![
            (HandlerKey::Home, Some("homeAll"), "all"),
            (HandlerKey::Home, Some("homeAxis"), "x"),
            (HandlerKey::Home, Some("homeAxis"), "y"),
            (HandlerKey::Home, Some("homeAxis"), "z"),
        ]
    );

    for binding in homing.entries() {
        binding.control().trigger();
    }
    assert_eq!(
        h.commands.take(),
        vec![
            Call::HomeAll,
            Call::HomeAxis('x'),
            Call::HomeAxis('y'),
            Call::HomeAxis('z'),
        ]
    );
}

#[test]
fn entry_count_is_axes_plus_one() {
    for axes in ["x", "xz", "xyza", "xyzabc"] {
        let h = harness(axes, 5);
        let menu = Menu::new("menuHoming", "&Homing");
        let homing = HomingMenu::install(&menu, &h.ctx);
        assert_eq!(homing.entry_count(), axes.len() + 1, "{axes}");
        assert_eq!(menu.len(), axes.len() + 1, "{axes}");
    }
}

#[test]
fn entries_fixed_after_axes_change() {
    let h = harness("xyz", 5);
    let status = Arc::new(MutableAxes {
        axes: Mutex::new(AxisLetter::parse_list("xyz").unwrap()),
    });
    let dispatcher = Rc::new(UiDispatcher::new(&h.bus));
    let ctx = HandlerContext::new(
        Rc::new(Recorder::default()),
        status.clone(),
        h.bus.clone(),
        dispatcher.clone(),
    );
    let menu = Menu::new("menuHoming", "&Homing");
    let homing = HomingMenu::install(&menu, &ctx);

    *status.axes.lock().unwrap() = AxisLetter::parse_list("xyzab").unwrap();
    h.bus
        .publish(AppEvent::Machine(MachineEvent::PowerChanged { on: true }))
        .unwrap();
    dispatcher.pump();

    assert_eq!(homing.entry_count(), 4);
    assert_eq!(menu.len(), 4);
}

#[test]
fn axes_listed_in_canonical_order() {
    let h = harness("zax", 5);
    let menu = Menu::new("menuHoming", "&Homing");
    let homing = HomingMenu::install(&menu, &h.ctx);

    let variants: Vec<&str> = homing.entries().iter().map(|b| b.variant()).collect();
    assert_eq!(variants, vec!["all", "x", "z", "a"]);
}

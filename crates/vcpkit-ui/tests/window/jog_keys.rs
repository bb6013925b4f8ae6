use vcpkit_core::JogSign;
use vcpkit_ui::{jog_mapping, JogKeyForwarder, Key, KeyEvent, KeyOutcome};

use crate::common::{harness, Call};

const DIRECTIONAL: [Key; 6] = [
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::PageUp,
    Key::PageDown,
];

#[test]
fn press_and_release_jog_then_stop() {
    let h = harness("xyz", 5);
    let jog = JogKeyForwarder::new(h.commands.clone());

    for key in DIRECTIONAL {
        let (axis, sign) = jog_mapping(&key).expect("directional key is mapped");
        assert_eq!(jog.key_pressed(&KeyEvent::new(key.clone())), KeyOutcome::Forwarded);
        assert_eq!(jog.key_released(&KeyEvent::new(key.clone())), KeyOutcome::Forwarded);

        assert_eq!(
            h.commands.take(),
            vec![
                Call::Jog(axis.as_char(), sign),
                Call::Jog(axis.as_char(), JogSign::Stop)
            ],
            "{key}"
        );
    }
}

#[test]
fn auto_repeat_produces_no_calls() {
    let h = harness("xyz", 5);
    let jog = JogKeyForwarder::new(h.commands.clone());

    for key in DIRECTIONAL {
        jog.key_pressed(&KeyEvent::repeat(key.clone()));
        jog.key_released(&KeyEvent::repeat(key));
    }
    assert!(h.commands.take().is_empty());
}

#[test]
fn held_key_sends_one_jog() {
    let h = harness("xyz", 5);
    let jog = JogKeyForwarder::new(h.commands.clone());

    jog.key_pressed(&KeyEvent::new(Key::Right));
    for _ in 0..10 {
        jog.key_pressed(&KeyEvent::repeat(Key::Right));
    }
    jog.key_released(&KeyEvent::new(Key::Right));

    assert_eq!(
        h.commands.take(),
        vec![
            Call::Jog('x', JogSign::Positive),
            Call::Jog('x', JogSign::Stop)
        ]
    );
}

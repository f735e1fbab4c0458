//! Input events and listener bindings
//!
//! The sonifier reacts to three kinds of host input. They are described
//! here independently of any windowing library; [`events_from_egui`]
//! translates an egui frame's events into this form.

use eframe::egui;

/// DOM-style key code for the letter P
pub const KEY_P: u32 = 80;

/// A key press with its modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    /// Uppercase ASCII code of the key (65 = A ... 90 = Z)
    pub key_code: u32,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    /// (Ctrl or Cmd) + Shift + P
    pub fn is_stop_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.shift && self.key_code == KEY_P
    }
}

/// An input event the sonifier listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click,
    PointerMove { x: i32, y: i32 },
    KeyDown(KeyChord),
}

impl InputEvent {
    /// Which listener handles this event
    pub fn listener(&self) -> Listener {
        match self {
            InputEvent::Click => Listener::Click,
            InputEvent::PointerMove { .. } => Listener::PointerMove,
            InputEvent::KeyDown(_) => Listener::KeyDown,
        }
    }
}

/// A kind of listener a sonifier can have registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    Click,
    PointerMove,
    KeyDown,
}

impl Listener {
    pub const ALL: &[Listener] = &[Listener::Click, Listener::PointerMove, Listener::KeyDown];
}

/// Listener registrations owned by one sonifier instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    click: bool,
    pointer_move: bool,
    key_down: bool,
}

impl Bindings {
    fn slot(&mut self, listener: Listener) -> &mut bool {
        match listener {
            Listener::Click => &mut self.click,
            Listener::PointerMove => &mut self.pointer_move,
            Listener::KeyDown => &mut self.key_down,
        }
    }

    pub fn install(&mut self, listener: Listener) {
        *self.slot(listener) = true;
    }

    pub fn remove(&mut self, listener: Listener) {
        *self.slot(listener) = false;
    }

    pub fn is_installed(&self, listener: Listener) -> bool {
        match listener {
            Listener::Click => self.click,
            Listener::PointerMove => self.pointer_move,
            Listener::KeyDown => self.key_down,
        }
    }

    /// Whether any listener is installed
    pub fn any(&self) -> bool {
        self.click || self.pointer_move || self.key_down
    }
}

/// Key code for letter keys, `None` for everything else
fn key_code(key: egui::Key) -> Option<u32> {
    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase() as u32),
        _ => None,
    }
}

/// Translate one frame of egui events
///
/// A click is reported when the primary button is released, matching
/// how browsers fire `click`.
pub fn events_from_egui(events: &[egui::Event]) -> Vec<InputEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove {
                x: pos.x.round() as i32,
                y: pos.y.round() as i32,
            }),
            egui::Event::PointerButton {
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } => Some(InputEvent::Click),
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => key_code(*key).map(|key_code| {
                InputEvent::KeyDown(KeyChord {
                    key_code,
                    ctrl: modifiers.ctrl,
                    meta: modifiers.mac_cmd,
                    shift: modifiers.shift,
                })
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(ctrl: bool, meta: bool, shift: bool, key_code: u32) -> KeyChord {
        KeyChord {
            key_code,
            ctrl,
            meta,
            shift,
        }
    }

    #[test]
    fn test_stop_shortcut() {
        assert!(chord(true, false, true, KEY_P).is_stop_shortcut());
        assert!(chord(false, true, true, KEY_P).is_stop_shortcut());
        assert!(!chord(true, false, false, KEY_P).is_stop_shortcut());
        assert!(!chord(false, false, true, KEY_P).is_stop_shortcut());
        assert!(!chord(true, false, true, 79).is_stop_shortcut());
    }

    #[test]
    fn test_bindings() {
        let mut bindings = Bindings::default();
        assert!(!bindings.any());

        bindings.install(Listener::Click);
        assert!(bindings.is_installed(Listener::Click));
        assert!(!bindings.is_installed(Listener::KeyDown));

        bindings.remove(Listener::Click);
        assert!(!bindings.any());
    }

    #[test]
    fn test_pointer_events() {
        let events = [
            egui::Event::PointerMoved(egui::pos2(10.4, 20.6)),
            egui::Event::PointerButton {
                pos: egui::pos2(10.0, 20.0),
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::default(),
            },
            egui::Event::PointerButton {
                pos: egui::pos2(10.0, 20.0),
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::default(),
            },
            egui::Event::PointerButton {
                pos: egui::pos2(10.0, 20.0),
                button: egui::PointerButton::Secondary,
                pressed: false,
                modifiers: egui::Modifiers::default(),
            },
        ];

        assert_eq!(
            events_from_egui(&events),
            vec![InputEvent::PointerMove { x: 10, y: 21 }, InputEvent::Click]
        );
    }

    #[test]
    fn test_key_events() {
        let modifiers = egui::Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        };
        let events = [
            egui::Event::Key {
                key: egui::Key::P,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            },
            egui::Event::Key {
                key: egui::Key::P,
                physical_key: None,
                pressed: false,
                repeat: false,
                modifiers,
            },
            egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            },
        ];

        let translated = events_from_egui(&events);
        assert_eq!(translated.len(), 1);
        match translated[0] {
            InputEvent::KeyDown(chord) => {
                assert_eq!(chord.key_code, KEY_P);
                assert!(chord.is_stop_shortcut());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}

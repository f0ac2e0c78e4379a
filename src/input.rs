/// Logical buttons and the latches that turn key events into held state.

use std::collections::HashMap;

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::TurnLeft,
        Button::TurnRight,
        Button::Thrust,
        Button::Fire,
    ];

    /// Fixed key map: arrows or WASD-style letters, space to fire.
    pub fn from_key(code: &KeyCode) -> Option<Button> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::TurnLeft),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::TurnRight),
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Thrust),
            KeyCode::Char(' ') => Some(Button::Fire),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: Button,
    pub pressed: bool,
}

/// Held state of the four buttons, read once per frame by the ship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl InputState {
    /// Event intake: latch on press, clear on release.
    pub fn apply(&mut self, event: ButtonEvent) {
        *self.slot(event.button) = event.pressed;
    }

    pub fn is_held(&self, button: Button) -> bool {
        match button {
            Button::TurnLeft => self.left,
            Button::TurnRight => self.right,
            Button::Thrust => self.thrust,
            Button::Fire => self.fire,
        }
    }

    fn slot(&mut self, button: Button) -> &mut bool {
        match button {
            Button::TurnLeft => &mut self.left,
            Button::TurnRight => &mut self.right,
            Button::Thrust => &mut self.thrust,
            Button::Fire => &mut self.fire,
        }
    }
}

/// Tracks the frame each button was last seen pressed or repeated.
///
/// Terminals with keyboard enhancement report releases, which clear the
/// button at once. Classic terminals only repeat presses while a key is held,
/// so a button also lapses after `hold_window` frames without a new press.
#[derive(Clone, Debug)]
pub struct KeyLatch {
    last_seen: HashMap<Button, u64>,
    hold_window: u64,
}

impl KeyLatch {
    pub fn new(hold_window: u64) -> Self {
        KeyLatch {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    /// Press or repeat.
    pub fn press(&mut self, button: Button, frame: u64) {
        self.last_seen.insert(button, frame);
    }

    pub fn release(&mut self, button: Button) {
        self.last_seen.remove(&button);
    }

    pub fn is_held(&self, button: Button, frame: u64) -> bool {
        self.last_seen
            .get(&button)
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Held state as of `frame`.
    pub fn state(&self, frame: u64) -> InputState {
        let mut state = InputState::default();
        for button in Button::ALL {
            state.apply(ButtonEvent {
                button,
                pressed: self.is_held(button, frame),
            });
        }
        state
    }
}

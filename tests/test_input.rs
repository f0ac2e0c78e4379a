use asteroids::input::*;

use crossterm::event::KeyCode;

// ── Key map ───────────────────────────────────────────────────────────────────

#[test]
fn arrows_and_space_map_to_buttons() {
    assert_eq!(Button::from_key(&KeyCode::Left), Some(Button::TurnLeft));
    assert_eq!(Button::from_key(&KeyCode::Right), Some(Button::TurnRight));
    assert_eq!(Button::from_key(&KeyCode::Up), Some(Button::Thrust));
    assert_eq!(Button::from_key(&KeyCode::Char(' ')), Some(Button::Fire));
}

#[test]
fn letter_keys_match_arrows() {
    // ← and A both turn left — results must be identical
    assert_eq!(Button::from_key(&KeyCode::Char('a')), Button::from_key(&KeyCode::Left));
    assert_eq!(Button::from_key(&KeyCode::Char('D')), Button::from_key(&KeyCode::Right));
    assert_eq!(Button::from_key(&KeyCode::Char('w')), Button::from_key(&KeyCode::Up));
}

#[test]
fn unmapped_keys_are_ignored() {
    assert_eq!(Button::from_key(&KeyCode::Down), None);
    assert_eq!(Button::from_key(&KeyCode::Char('q')), None);
    assert_eq!(Button::from_key(&KeyCode::Enter), None);
}

// ── InputState ────────────────────────────────────────────────────────────────

#[test]
fn input_latches_until_release() {
    let mut input = InputState::default();
    input.apply(ButtonEvent { button: Button::Fire, pressed: true });
    input.apply(ButtonEvent { button: Button::TurnLeft, pressed: true });
    assert!(input.fire);
    assert!(input.left);
    assert!(!input.right);
    assert!(!input.thrust);

    input.apply(ButtonEvent { button: Button::Fire, pressed: false });
    assert!(!input.is_held(Button::Fire));
    assert!(input.is_held(Button::TurnLeft));
}

// ── KeyLatch ──────────────────────────────────────────────────────────────────

#[test]
fn latch_holds_within_window() {
    let mut latch = KeyLatch::new(4);
    latch.press(Button::Thrust, 10);
    assert!(latch.is_held(Button::Thrust, 10));
    assert!(latch.is_held(Button::Thrust, 14));
    assert!(!latch.is_held(Button::Thrust, 15));
}

#[test]
fn latch_repeat_refreshes_window() {
    let mut latch = KeyLatch::new(4);
    latch.press(Button::Fire, 10);
    latch.press(Button::Fire, 13);
    assert!(latch.is_held(Button::Fire, 17));
}

#[test]
fn latch_release_clears_immediately() {
    let mut latch = KeyLatch::new(4);
    latch.press(Button::TurnRight, 10);
    latch.release(Button::TurnRight);
    assert!(!latch.is_held(Button::TurnRight, 10));
}

#[test]
fn latch_state_reports_all_buttons() {
    let mut latch = KeyLatch::new(4);
    latch.press(Button::TurnLeft, 1);
    latch.press(Button::Fire, 3);

    let state = latch.state(5);
    assert_eq!(
        state,
        InputState { left: true, right: false, thrust: false, fire: true }
    );

    let later = latch.state(6);
    assert!(!later.left);
    assert!(later.fire);
}

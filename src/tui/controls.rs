//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Presets bound to the number keys, in key order.
pub const PRESET_KEYS: [&str; 3] = ["baseline", "east_facing", "high_inflation"];

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Faster,
    Slower,
    Restart,
    RevealAll,
    Preset(&'static str),
}

/// Decodes a key event; releases and repeats map to `None`.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('+' | '=') | KeyCode::Right => Action::Faster,
        KeyCode::Char('-') | KeyCode::Left => Action::Slower,
        KeyCode::Char('r') | KeyCode::Home => Action::Restart,
        KeyCode::Char('e') | KeyCode::End => Action::RevealAll,
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            Action::Preset(PRESET_KEYS[idx])
        }
        _ => return None,
    };
    Some(action)
}

/// Applies a key event to the application state.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match action_for(key) {
        Some(Action::Quit) => app.quit = true,
        Some(Action::TogglePause) => app.toggle_pause(),
        Some(Action::Faster) => app.speed_up(),
        Some(Action::Slower) => app.speed_down(),
        Some(Action::Restart) => app.restart(),
        Some(Action::RevealAll) => app.reveal_all(),
        Some(Action::Preset(name)) => app.switch_preset(name),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::config::ScenarioConfig;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_select_presets() {
        assert_eq!(
            action_for(press(KeyCode::Char('2'))),
            Some(Action::Preset("east_facing"))
        );
        assert_eq!(action_for(press(KeyCode::Char('4'))), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert_eq!(action_for(key), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(key), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn end_reveals_every_year() {
        let mut app = App::new("baseline", ScenarioConfig::baseline());
        handle_key(&mut app, press(KeyCode::End));
        assert!(app.is_finished());
    }
}

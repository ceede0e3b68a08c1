// Action-key debouncing
//
// Some terminals never send key release events, and some send a burst of
// presses for one physical key. Action keys (Enter, Esc, Tab, F-keys, ...)
// fire once per press and are debounced; every other key passes through so
// typing and arrow navigation are never dropped.

use crossterm::event::KeyCode;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Minimum gap between two triggers of the same held action key
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Tracks the state of a single key
#[derive(Debug, Default)]
struct KeyState {
    is_pressed: bool,
    last_triggered: Option<Instant>,
}

pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    /// Keys that trigger once per press
    action_keys: HashSet<KeyCode>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            action_keys: HashSet::new(),
        }
    }

    pub fn configure_action_keys(&mut self, keys: &[KeyCode]) {
        self.action_keys.extend(keys.iter().copied());
    }

    /// Handle a key press event
    /// Returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        if !self.action_keys.contains(&key) {
            return true;
        }

        let now = Instant::now();
        let state = self.key_states.entry(key).or_default();

        if state.is_pressed {
            // No release seen: only retrigger after the debounce window
            match state.last_triggered {
                Some(last) if now.duration_since(last) >= ACTION_DEBOUNCE => {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            }
        } else {
            state.is_pressed = true;
            state.last_triggered = Some(now);
            true
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            state.is_pressed = false;
            state.last_triggered = None;
        }
    }

    pub fn with_default_config() -> Self {
        let mut handler = Self::new();
        handler.configure_action_keys(&[
            KeyCode::Enter,
            KeyCode::Esc,
            KeyCode::Tab,
            KeyCode::BackTab,
            KeyCode::F(1),
            KeyCode::F(2),
            KeyCode::F(5),
            KeyCode::F(9),
        ]);
        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}

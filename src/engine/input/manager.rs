// Input manager - keyboard action state plus the touch event queue

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::touch::{MouseTouch, TouchEvent, TouchPhase, MOUSE_TOUCH_ID};
use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Coordinates keyboard and touch input for the game
///
/// Keyboard state is polled (`is_pressed`), touches are queued in arrival
/// order and drained once per frame.
#[derive(Debug)]
pub struct InputManager {
    /// Key bindings
    config: InputConfig,

    /// Actions currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last `update`
    just_pressed: HashSet<Action>,

    /// Touch events not yet drained
    touches: Vec<TouchEvent>,

    /// Mouse standing in for a touch
    mouse: MouseTouch,
}

impl InputManager {
    /// Create a new input manager with the given bindings
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            touches: Vec::new(),
            mouse: MouseTouch::default(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state == ElementState::Pressed, event.repeat);
        }
    }

    /// Process a key press or release
    pub fn process_key(&mut self, key_code: KeyCode, pressed: bool, repeat: bool) {
        let Some(action) = self.config.get_action(InputSource::key(key_code)) else {
            return;
        };

        if pressed {
            // Key repeat doesn't count as a new press
            if !repeat && self.pressed.insert(action) {
                self.just_pressed.insert(action);
            }
        } else {
            self.pressed.remove(&action);
        }
    }

    /// Queue a touch event
    pub fn push_touch(&mut self, event: TouchEvent) {
        self.touches.push(event);
    }

    /// Cursor moved to `position` (screen pixels)
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        if let Some((phase, position)) = self.mouse.moved(position) {
            self.push_touch(TouchEvent::new(MOUSE_TOUCH_ID, phase, position, true));
        }
    }

    /// Left mouse button changed; `is_game_touch` applies to presses
    pub fn process_mouse_button(&mut self, pressed: bool, is_game_touch: bool) {
        if let Some((phase, position)) = self.mouse.button(pressed) {
            let is_game_touch = phase != TouchPhase::Start || is_game_touch;
            self.push_touch(TouchEvent::new(
                MOUSE_TOUCH_ID,
                phase,
                position,
                is_game_touch,
            ));
        }
    }

    /// Cursor left the window
    pub fn process_cursor_left(&mut self) {
        if let Some((phase, position)) = self.mouse.left() {
            self.push_touch(TouchEvent::new(MOUSE_TOUCH_ID, phase, position, true));
        }
    }

    /// Last known cursor position
    pub fn cursor_position(&self) -> Vec2 {
        self.mouse.position()
    }

    /// Take every queued touch event, oldest first
    pub fn drain_touches(&mut self) -> Vec<TouchEvent> {
        std::mem::take(&mut self.touches)
    }

    /// Check if an action is held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last `update`
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Start a new frame of edge-triggered state
    /// Call this once per frame after the frame has read its input
    pub fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::keyboard())
    }
}

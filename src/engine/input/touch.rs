// Touch events as delivered to the game, one queue drained per frame

use glam::Vec2;

/// Identifier the mouse uses when it stands in for a touch
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

/// Stage of a touch's life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    /// The touch left the window or was cancelled by the platform
    Leave,
}

impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => TouchPhase::Start,
            winit::event::TouchPhase::Moved => TouchPhase::Move,
            winit::event::TouchPhase::Ended => TouchPhase::End,
            winit::event::TouchPhase::Cancelled => TouchPhase::Leave,
        }
    }
}

/// A single touch change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub id: u64,
    pub phase: TouchPhase,
    /// Screen position in pixels
    pub position: Vec2,
    /// Whether the touch may drive gameplay (e.g. not on a letterbox bar)
    pub is_game_touch: bool,
}

impl TouchEvent {
    pub fn new(id: u64, phase: TouchPhase, position: Vec2, is_game_touch: bool) -> Self {
        Self {
            id,
            phase,
            position,
            is_game_touch,
        }
    }
}

/// Tracks the mouse so it can be fed through the touch queue
#[derive(Debug, Default)]
pub struct MouseTouch {
    position: Vec2,
    pressed: bool,
}

impl MouseTouch {
    /// Cursor moved; a move event while the button is held
    pub fn moved(&mut self, position: Vec2) -> Option<(TouchPhase, Vec2)> {
        self.position = position;
        self.pressed.then_some((TouchPhase::Move, position))
    }

    /// Left button changed state
    pub fn button(&mut self, pressed: bool) -> Option<(TouchPhase, Vec2)> {
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;
        let phase = if pressed {
            TouchPhase::Start
        } else {
            TouchPhase::End
        };
        Some((phase, self.position))
    }

    /// Cursor left the window; ends a held press
    pub fn left(&mut self) -> Option<(TouchPhase, Vec2)> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        Some((TouchPhase::Leave, self.position))
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

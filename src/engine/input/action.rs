// Action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all keyboard-driven actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Ship movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Scene
    ResetDebris,
    TogglePhysicsDebug,

    // Debug sliders
    NextWatch,
    WatchDecrease,
    WatchIncrease,

    // Meta actions
    Pause,
    Quit,
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::KeyR), Action::ResetDebris),
        (InputSource::key(KeyCode::F1), Action::TogglePhysicsDebug),
        (InputSource::key(KeyCode::Tab), Action::NextWatch),
        (InputSource::key(KeyCode::BracketLeft), Action::WatchDecrease),
        (InputSource::key(KeyCode::BracketRight), Action::WatchIncrease),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}

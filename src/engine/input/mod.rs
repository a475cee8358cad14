// Input handling system
//
// Keyboard keys map to actions through an `InputConfig` binding table and are
// polled each frame. Touches (and the mouse standing in for one) are queued
// as `TouchEvent`s and drained by the game once per frame, so they are
// always seen in arrival order and never mid-update.
//
// ## Architecture
//
// - `action`: Defines actions and default key bindings
// - `config`: Key binding configuration and remapping
// - `touch`: Touch events and mouse-as-touch tracking
// - `manager`: Input manager coordinating everything

pub mod action;
pub mod config;
pub mod manager;
pub mod touch;

pub use action::Action;
pub use manager::InputManager;
pub use touch::{TouchEvent, TouchPhase};

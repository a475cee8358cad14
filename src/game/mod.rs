// Debris dodger: the application controller and its scene objects

mod app;
mod debris;
mod ship;
mod touch;

pub use app::Application;

use crate::engine::EngineError;

/// Errors raised while setting up the scene
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid collision shape: {0}")]
    InvalidShape(&'static str),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

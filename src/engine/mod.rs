// Engine modules: frame loop, input, physics, renderer, debug watches

pub mod context;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod watch;

pub use context::{Engine, FrameHooks, PostDraw};

/// Errors reported by the engine context
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine context has been destroyed")]
    Destroyed,

    #[error("Unknown mesh handle: {0}")]
    UnknownMesh(usize),
}

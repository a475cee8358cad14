// Physics system using rapier2d

pub mod body;
mod collision;
mod debug;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::CollisionEvent;
pub use debug::DebugDraw;
pub use world::PhysicsWorld;

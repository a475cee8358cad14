// The player ship: a kinematic triangle steered by touch or arrow keys

use glam::{Mat3, Vec2, Vec3};

use super::GameError;
use crate::core::math::clamp_inset;
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::MeshHandle;

pub const SHIP_WIDTH: f32 = 3.0;
pub const SHIP_HEIGHT: f32 = 1.75;

/// Arrow key speeds in view units per second
pub const KEY_SPEED_X: f32 = 6.0;
pub const KEY_SPEED_Y: f32 = 3.0;

/// Closest the ship may get to a view edge
const VIEW_MARGIN: f32 = 1.0;

/// Which arrow keys are held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrowKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ArrowKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Velocity for this frame
///
/// Held keys win over the touch target. An axis with no key held keeps
/// `previous`; with opposing keys held, down and right take precedence.
pub fn steering_velocity(
    keys: ArrowKeys,
    previous: Vec2,
    position: Vec2,
    target: Vec2,
) -> Vec2 {
    if !keys.any() {
        return target - position;
    }

    let mut velocity = previous;
    if keys.up {
        velocity.y = -KEY_SPEED_Y;
    }
    if keys.down {
        velocity.y = KEY_SPEED_Y;
    }
    if keys.left {
        velocity.x = -KEY_SPEED_X;
    }
    if keys.right {
        velocity.x = KEY_SPEED_X;
    }
    velocity
}

/// Where the ship mesh sits for a physics position
pub fn mesh_position(position: Vec2) -> Vec3 {
    Vec3::new(-position.x * 0.1 + 1.0, -position.y * 0.15 + 0.8, 0.0)
}

/// Mesh rotation from the debug angles: Y first, then Z, then X
pub fn mesh_rotation(x: f32, y: f32, z: f32) -> Mat3 {
    Mat3::from_rotation_x(x) * Mat3::from_rotation_z(z) * Mat3::from_rotation_y(y)
}

pub struct Ship {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    mesh: MeshHandle,
    position: Vec2,
    velocity: Vec2,
}

impl Ship {
    /// Add the ship to the world at `position`
    pub fn spawn(
        world: &mut PhysicsWorld,
        position: Vec2,
        mesh: MeshHandle,
    ) -> Result<Self, GameError> {
        let collider = presets::ship_collider(SHIP_WIDTH, SHIP_HEIGHT)
            .ok_or(GameError::InvalidShape("ship triangle"))?;
        let body = world.add_rigid_body(presets::ship_body(position.x, position.y));
        let collider = world.add_collider(collider, body);

        Ok(Self {
            body,
            collider,
            mesh,
            position,
            velocity: Vec2::ZERO,
        })
    }

    /// Set the velocity from held keys or the touch target
    pub fn steer(&mut self, world: &mut PhysicsWorld, keys: ArrowKeys, target: Vec2) {
        self.velocity = steering_velocity(keys, self.velocity, self.position, target);
        world.set_velocity(self.body, self.velocity);
    }

    /// Read the body position back, clamped inside the view
    pub fn clamp_to_view(&mut self, world: &mut PhysicsWorld, view_size: Vec2) -> Vec2 {
        let position = world.position(self.body).unwrap_or(self.position);
        self.position = clamp_inset(position, Vec2::ZERO, view_size, VIEW_MARGIN);
        world.set_position(self.body, self.position);
        self.position
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }
}

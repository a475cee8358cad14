// The debris crate drifting across the view

use glam::Vec2;

use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::Sprite;

pub const DEBRIS_WIDTH: f32 = 1.0;
pub const DEBRIS_HEIGHT: f32 = 1.0;
pub const DEBRIS_TEXTURE: &str = "textures/crate.jpg";

/// Where the debris enters for a view of the given size
pub fn debris_start(view_size: Vec2) -> Vec2 {
    Vec2::new(view_size.x, view_size.y / 2.0 + 0.1)
}

pub struct Debris {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    sprite: Sprite,
}

impl Debris {
    /// Add a debris box to the world centred on `position`
    pub fn spawn(world: &mut PhysicsWorld, position: Vec2) -> Self {
        let body = world.add_rigid_body(presets::debris_body(position.x, position.y));
        let collider = world.add_collider(
            presets::debris_collider(DEBRIS_WIDTH, DEBRIS_HEIGHT),
            body,
        );
        let size = Vec2::new(DEBRIS_WIDTH, DEBRIS_HEIGHT);
        let sprite = Sprite::new(DEBRIS_TEXTURE, position - size / 2.0, size);

        Self {
            body,
            collider,
            sprite,
        }
    }

    /// Remove the body and its collider from the world
    pub fn despawn(self, world: &mut PhysicsWorld) {
        world.remove_rigid_body(self.body);
    }

    /// Copy the body transform into the sprite
    pub fn sync_sprite(&mut self, world: &PhysicsWorld) -> &Sprite {
        if let Some(position) = world.position(self.body) {
            self.sprite.position = position - self.sprite.size / 2.0;
        }
        if let Some(rotation) = world.rotation(self.body) {
            self.sprite.rotation = rotation;
        }
        &self.sprite
    }

    #[cfg(test)]
    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.position(self.body)
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_start_position() {
        let start = debris_start(Vec2::new(20.0, 10.0));
        assert_relative_eq!(start.x, 20.0);
        assert_relative_eq!(start.y, 5.1);
    }

    #[test]
    fn test_sprite_is_centred_on_body() {
        let mut world = PhysicsWorld::with_gravity(Vec2::new(-1.0, 0.0));
        let mut debris = Debris::spawn(&mut world, Vec2::new(20.0, 5.1));
        assert_eq!(debris.sprite.texture, DEBRIS_TEXTURE);

        for _ in 0..30 {
            world.step();
        }
        let position = debris.position(&world).unwrap();
        let sprite = debris.sync_sprite(&world);

        assert!(position.x < 20.0);
        assert_relative_eq!(sprite.position.x, position.x - 0.5);
        assert_relative_eq!(sprite.position.y, position.y - 0.5);
        assert_relative_eq!(sprite.center().x, position.x, epsilon = 1e-5);
    }

    #[test]
    fn test_despawn_removes_body() {
        let mut world = PhysicsWorld::with_gravity(Vec2::ZERO);
        let debris = Debris::spawn(&mut world, Vec2::new(5.0, 5.0));
        assert_eq!(world.debug_data().rigid_bodies.len(), 1);

        debris.despawn(&mut world);
        assert_eq!(world.debug_data().rigid_bodies.len(), 0);
    }
}

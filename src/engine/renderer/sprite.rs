// Sprites: textured rectangles placed in view space

use glam::{Vec2, Vec4};

/// A 2D sprite for rendering
///
/// `position` is the top-left corner in view units before rotation; the
/// sprite rotates about its centre.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Texture name (drawn as a crate outline, textures are not loaded)
    pub texture: String,
    /// Top-left corner in view space
    pub position: Vec2,
    /// Size in view units
    pub size: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Color tint (RGBA)
    pub color: Vec4,
}

impl Sprite {
    /// Create a new sprite
    pub fn new(texture: &str, position: Vec2, size: Vec2) -> Self {
        Self {
            texture: texture.to_string(),
            position,
            size,
            rotation: 0.0,
            color: Vec4::new(0.85, 0.65, 0.35, 1.0),
        }
    }

    /// Centre of the sprite in view space
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// The four corners in view space, clockwise from top-left, rotated about the centre
    pub fn corners(&self) -> [Vec2; 4] {
        let center = self.center();
        let half = self.size * 0.5;
        let rotation = Vec2::from_angle(self.rotation);
        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| center + rotation.rotate(corner))
    }
}

use glam::{Vec2, Vec4};
use rapier2d::prelude::*;

use super::world::PhysicsWorld;
use crate::engine::renderer::{push_polygon, Line, ScreenRect, Viewport};

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: usize = 16;

/// Debug drawer for physics objects
///
/// Collects collider outlines as screen-space lines. Physics coordinates are
/// mapped from the physics viewport (view units, origin top-left) onto the
/// screen viewport given for the frame.
pub struct DebugDraw {
    /// Size of the physics viewport in view units
    physics_viewport: Vec2,
    /// Screen rectangle the physics viewport maps onto
    screen_viewport: Viewport,
    lines: Vec<Line>,
    drawing: bool,
}

impl DebugDraw {
    /// Create a drawer for a physics viewport of the given size
    pub fn new(physics_viewport: Vec2) -> Self {
        Self {
            physics_viewport,
            screen_viewport: Viewport::from_rect(ScreenRect::new(
                0.0,
                0.0,
                physics_viewport.x,
                physics_viewport.y,
            )),
            lines: Vec::new(),
            drawing: false,
        }
    }

    /// Set the screen area the physics viewport is drawn into
    pub fn set_screen_viewport(&mut self, viewport: Viewport) {
        self.screen_viewport = viewport;
    }

    /// Start a new batch, discarding the previous one
    pub fn begin(&mut self) {
        self.lines.clear();
        self.drawing = true;
    }

    /// Finish the batch and hand out its lines
    pub fn end(&mut self) -> &[Line] {
        self.drawing = false;
        &self.lines
    }

    /// Outline every collider in the world
    pub fn draw_world(&mut self, world: &PhysicsWorld) {
        if !self.drawing {
            log::warn!("DebugDraw::draw_world called outside begin/end");
            return;
        }

        let data = world.debug_data();
        for (_handle, collider) in data.colliders.iter() {
            let parent_body = collider.parent().and_then(|h| data.rigid_bodies.get(h));

            let color = match parent_body.map(|body| body.body_type()) {
                Some(RigidBodyType::Dynamic) => Vec4::new(0.0, 1.0, 0.0, 0.8),
                Some(RigidBodyType::Fixed) => Vec4::new(0.5, 0.5, 0.5, 0.8),
                Some(RigidBodyType::KinematicPositionBased)
                | Some(RigidBodyType::KinematicVelocityBased) => Vec4::new(0.0, 0.5, 1.0, 0.8),
                None => Vec4::new(1.0, 1.0, 1.0, 0.8),
            };

            self.draw_collider_shape(collider, collider.position(), color);
        }
    }

    /// Map a physics point to screen pixels
    fn to_screen(&self, point: Point<Real>) -> Vec2 {
        let scale = Vec2::new(
            self.screen_viewport.width() / self.physics_viewport.x,
            self.screen_viewport.height() / self.physics_viewport.y,
        );
        self.screen_viewport.min + Vec2::new(point.x, point.y) * scale
    }

    fn draw_collider_shape(
        &mut self,
        collider: &Collider,
        transform: &Isometry<Real>,
        color: Vec4,
    ) {
        let shape = collider.shape();
        if let Some(cuboid) = shape.as_cuboid() {
            let h = cuboid.half_extents;
            self.draw_polygon(
                transform,
                &[
                    point![-h.x, -h.y],
                    point![h.x, -h.y],
                    point![h.x, h.y],
                    point![-h.x, h.y],
                ],
                color,
            );
        } else if let Some(polygon) = shape.as_convex_polygon() {
            self.draw_polygon(transform, polygon.points(), color);
        } else if let Some(ball) = shape.as_ball() {
            let points: Vec<_> = (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                    point![angle.cos() * ball.radius, angle.sin() * ball.radius]
                })
                .collect();
            self.draw_polygon(transform, &points, color);
        } else {
            // Shapes without an outline get a cross at their origin
            let size = 0.5;
            let points = [
                point![-size, 0.0],
                point![size, 0.0],
                point![0.0, -size],
                point![0.0, size],
            ];
            let p: Vec<_> = points.iter().map(|p| self.to_screen(transform * p)).collect();
            self.lines.push(Line::new(p[0], p[1], color));
            self.lines.push(Line::new(p[2], p[3], color));
        }
    }

    fn draw_polygon(&mut self, transform: &Isometry<Real>, points: &[Point<Real>], color: Vec4) {
        let screen: Vec<_> = points
            .iter()
            .map(|p| self.to_screen(transform * p))
            .collect();
        push_polygon(&mut self.lines, &screen, color);
    }
}

use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType, gravity_scale: Real, can_sleep: bool) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            gravity_scale,
            can_sleep,
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic, 1.0, true)
    }

    /// Create a new kinematic velocity-based body (moved by setting its velocity)
    pub fn new_kinematic_velocity_based() -> Self {
        Self::with_type(RigidBodyType::KinematicVelocityBased, 0.0, false)
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            active_events: ActiveEvents::empty(),
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a collider from a convex polygon, `None` if the points are degenerate
    pub fn convex_hull(points: &[[Real; 2]]) -> Option<Self> {
        let points: Vec<_> = points.iter().map(|p| point![p[0], p[1]]).collect();
        SharedShape::convex_hull(&points).map(Self::with_shape)
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Report collision start/stop events for this collider
    pub fn collision_events(mut self) -> Self {
        self.active_events |= ActiveEvents::COLLISION_EVENTS;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .active_events(self.active_events)
            .build()
    }
}

/// Body and collider configurations for the demo's two objects
pub mod presets {
    use super::*;

    /// Debris body: dynamic, pulled along by world gravity
    pub fn debris_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic().position(x, y).can_sleep(false).build()
    }

    /// Debris collider: a box of the given footprint
    pub fn debris_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Debris)
            .build()
    }

    /// Ship body: kinematic, moved only by the velocity written each frame
    pub fn ship_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_velocity_based()
            .position(x, y)
            .build()
    }

    /// Ship collider: a triangle pointing along +x with its tip at `width / 2`
    pub fn ship_collider(width: Real, height: Real) -> Option<Collider> {
        let vertices = [
            [width / 2.0, 0.0],
            [-width / 2.0, height / 2.0],
            [-width / 2.0, -height / 2.0],
        ];
        ColliderBuilder2D::convex_hull(&vertices).map(|builder| {
            builder
                .collision_groups(CollisionGroups::Ship)
                .collision_events()
                .build()
        })
    }
}

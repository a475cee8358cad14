use glam::Vec2;
use rapier2d::prelude::*;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};
use crate::engine::game_loop::{Simulation, DEFAULT_STEP_RATE};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision events recorded since the last drain
    collision_event_queue: CollisionEventQueue,

    /// Steps per simulated second
    step_rate: u32,

    /// Steps taken so far
    step_count: u64,
}

impl PhysicsWorld {
    /// Create a new physics world stepping at 60 Hz
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self::with_gravity_and_rate(gravity, DEFAULT_STEP_RATE)
    }

    /// Create a new physics world with custom gravity and step rate
    pub fn with_gravity_and_rate(gravity: Vec2, step_rate: u32) -> Self {
        let step_rate = step_rate.max(1);
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / step_rate as Real;

        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            step_rate,
            step_count: 0,
        }
    }

    /// Step the physics simulation forward by one fixed timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.collision_event_queue,
        );
        self.step_count += 1;
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Position of a body, `None` if the handle is stale
    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Move a body, waking it up
    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    /// Rotation of a body in radians, `None` if the handle is stale
    pub fn rotation(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.get_rigid_body(handle).map(|body| body.rotation().angle())
    }

    /// Linear velocity of a body, `None` if the handle is stale
    #[cfg(test)]
    pub fn velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
    }

    /// Set the linear velocity of a body, waking it up
    pub fn set_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Take the collision events recorded since the last call
    pub fn drain_collision_events(&mut self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.drain()
    }

    /// Number of steps taken since creation
    #[cfg(test)]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Get references to internal components for debug rendering
    pub fn debug_data(&self) -> DebugData<'_> {
        DebugData {
            rigid_bodies: &self.rigid_body_set,
            colliders: &self.collider_set,
        }
    }
}

impl Simulation for PhysicsWorld {
    fn simulated_time(&self) -> f64 {
        // Computed from the step count so it never drifts from n / rate
        self.step_count as f64 / self.step_rate as f64
    }

    fn step(&mut self) {
        PhysicsWorld::step(self);
    }
}

/// Data structure for debug rendering
pub struct DebugData<'a> {
    pub rigid_bodies: &'a RigidBodySet,
    pub colliders: &'a ColliderSet,
}

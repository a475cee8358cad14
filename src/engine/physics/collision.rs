use rapier2d::prelude::*;
use std::sync::{Arc, Mutex, MutexGuard};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The player's ship
    Ship = 0b0000_0010,

    /// Drifting debris
    Debris = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The ship only cares about debris
            CollisionGroups::Ship => Group::from_bits_truncate(
                CollisionGroups::Debris as u32 | CollisionGroups::Default as u32,
            ),

            // Debris hits the ship and other debris
            CollisionGroups::Debris => Group::from_bits_truncate(
                CollisionGroups::Ship as u32
                    | CollisionGroups::Debris as u32
                    | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// Whether this event started a contact between `a` and `b`, in either order
    pub fn started_between(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            } => (collider1 == a && collider2 == b) || (collider1 == b && collider2 == a),
            CollisionEvent::Stopped { .. } => false,
        }
    }
}

/// Queue for storing collision events during physics steps
///
/// rapier requires event handlers to be `Sync`, hence the mutex.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(8))),
        }
    }

    /// Take every event recorded since the last drain
    pub fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn push(&self, event: CollisionEvent) {
        self.lock().push(event);
    }

    /// Lock the queue; a poisoned lock still holds a valid event list
    fn lock(&self) -> MutexGuard<'_, Vec<CollisionEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| {
            log::warn!("Collision event queue lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

// Single-touch tracking: the first game touch steers the ship

use glam::Vec2;

use crate::engine::input::{TouchEvent, TouchPhase};

/// Follows at most one touch and turns it into a target position
#[derive(Debug, Clone)]
pub struct TouchTracker {
    active: Option<u64>,
    /// Target in view space
    target: Vec2,
    touch_count: u32,
}

impl TouchTracker {
    pub fn new(target: Vec2) -> Self {
        Self {
            active: None,
            target,
            touch_count: 0,
        }
    }

    /// Apply one touch event
    ///
    /// `to_view` maps screen pixels into view space. When the tracked touch
    /// ends the target snaps back to `ship_position`, so the ship stops.
    pub fn handle<F>(&mut self, event: &TouchEvent, to_view: F, ship_position: Vec2)
    where
        F: Fn(Vec2) -> Vec2,
    {
        match event.phase {
            TouchPhase::Start => {
                if self.active.is_none() && event.is_game_touch {
                    self.active = Some(event.id);
                    self.target = to_view(event.position);
                    self.touch_count += 1;
                    log::debug!(
                        "Tracking touch {} at {:?} ({} so far)",
                        event.id,
                        self.target,
                        self.touch_count
                    );
                }
            }
            TouchPhase::Move => {
                if self.active == Some(event.id) {
                    self.target = to_view(event.position);
                }
            }
            TouchPhase::End | TouchPhase::Leave => {
                if self.active == Some(event.id) {
                    self.active = None;
                    self.target = ship_position;
                    log::debug!("Touch {} released", event.id);
                }
            }
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halve(p: Vec2) -> Vec2 {
        p * 0.5
    }

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> TouchEvent {
        TouchEvent::new(id, phase, Vec2::new(x, y), true)
    }

    #[test]
    fn test_start_adopts_touch() {
        let mut tracker = TouchTracker::new(Vec2::ZERO);
        tracker.handle(&touch(4, TouchPhase::Start, 10.0, 6.0), halve, Vec2::ZERO);

        assert_eq!(tracker.active, Some(4));
        assert_eq!(tracker.target(), Vec2::new(5.0, 3.0));
        assert_eq!(tracker.touch_count, 1);
    }

    #[test]
    fn test_second_touch_ignored_while_tracking() {
        let mut tracker = TouchTracker::new(Vec2::ZERO);
        tracker.handle(&touch(1, TouchPhase::Start, 2.0, 2.0), halve, Vec2::ZERO);
        tracker.handle(&touch(2, TouchPhase::Start, 8.0, 8.0), halve, Vec2::ZERO);

        assert_eq!(tracker.active, Some(1));
        assert_eq!(tracker.target(), Vec2::new(1.0, 1.0));
        assert_eq!(tracker.touch_count, 1);
    }

    #[test]
    fn test_non_game_touch_ignored() {
        let mut tracker = TouchTracker::new(Vec2::ONE);
        let event = TouchEvent::new(1, TouchPhase::Start, Vec2::new(9.0, 9.0), false);
        tracker.handle(&event, halve, Vec2::ZERO);

        assert_eq!(tracker.active, None);
        assert_eq!(tracker.target(), Vec2::ONE);
    }

    #[test]
    fn test_move_only_from_tracked_touch() {
        let mut tracker = TouchTracker::new(Vec2::ZERO);
        tracker.handle(&touch(1, TouchPhase::Start, 2.0, 2.0), halve, Vec2::ZERO);
        tracker.handle(&touch(2, TouchPhase::Move, 20.0, 20.0), halve, Vec2::ZERO);
        assert_eq!(tracker.target(), Vec2::new(1.0, 1.0));

        tracker.handle(&touch(1, TouchPhase::Move, 4.0, 6.0), halve, Vec2::ZERO);
        assert_eq!(tracker.target(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_leave_resets_to_ship() {
        let mut tracker = TouchTracker::new(Vec2::ZERO);
        let ship = Vec2::new(7.0, 3.0);
        tracker.handle(&touch(1, TouchPhase::Start, 2.0, 2.0), halve, ship);
        tracker.handle(&touch(1, TouchPhase::Leave, 2.0, 2.0), halve, ship);

        assert_eq!(tracker.active, None);
        assert_eq!(tracker.target(), ship);

        // A fresh touch can be adopted again
        tracker.handle(&touch(5, TouchPhase::Start, 0.0, 0.0), halve, ship);
        assert_eq!(tracker.active, Some(5));
        assert_eq!(tracker.touch_count, 2);
    }

    #[test]
    fn test_end_from_other_touch_ignored() {
        let mut tracker = TouchTracker::new(Vec2::ZERO);
        tracker.handle(&touch(1, TouchPhase::Start, 2.0, 2.0), halve, Vec2::ZERO);
        tracker.handle(&touch(9, TouchPhase::End, 0.0, 0.0), halve, Vec2::new(5.0, 5.0));

        assert_eq!(tracker.active, Some(1));
        assert_eq!(tracker.target(), Vec2::new(1.0, 1.0));
    }
}

// Application controller
//
// Owns the engine context, the physics world and the two scene objects.
// One `update` per rendered frame: read input, steer, catch the physics
// world up to real time in fixed steps, clamp, sync transforms, draw.

use glam::{Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

use super::debris::{debris_start, Debris};
use super::ship::{mesh_position, mesh_rotation, ArrowKeys, Ship};
use super::touch::TouchTracker;
use super::GameError;
use crate::engine::game_loop::FixedTimestep;
use crate::engine::input::Action;
use crate::engine::physics::{CollisionEvent, DebugDraw, PhysicsWorld};
use crate::engine::renderer::Viewport;
use crate::engine::watch::WatchId;
use crate::engine::{Engine, FrameHooks, PostDraw};

/// View size in view units; y points down
pub const VIEW_SIZE: Vec2 = Vec2::new(20.0, 10.0);

/// Sideways gravity pulling the debris left
pub const GRAVITY: Vec2 = Vec2::new(-1.0, 0.0);

const SHIP_MESH: &str = "models/ship.dae";
const SHIP_MESH_SIZE: Vec3 = Vec3::splat(3.0);
const CLEAR_COLOR: Vec4 = Vec4::new(0.3, 0.3, 0.3, 1.0);
const WATCH_GROUP: &str = "Debug";

/// Debug sliders for the ship mesh rotation
struct MeshRotateWatches {
    x: WatchId,
    y: WatchId,
    z: WatchId,
}

impl MeshRotateWatches {
    fn register(engine: &mut Engine) -> Self {
        let step = TAU / 360.0;
        let watches = engine.watches_mut();
        Self {
            x: watches.add_slider("Mesh Rotate X", WATCH_GROUP, 0.0, 0.0, TAU, step),
            y: watches.add_slider("Mesh Rotate Y", WATCH_GROUP, PI * 3.0 / 2.0, 0.0, TAU, step),
            z: watches.add_slider("Mesh Rotate Z", WATCH_GROUP, 0.0, 0.0, TAU, step),
        }
    }
}

/// Everything the application owns besides the engine
struct Scene {
    world: PhysicsWorld,
    timestep: FixedTimestep,
    ship: Ship,
    debris: Option<Debris>,
    touch: TouchTracker,
    watches: MeshRotateWatches,
    debug_draw: DebugDraw,
    /// Scene viewport, snapshotted at pre-draw
    viewport: Viewport,
    hit_count: u32,
}

impl Scene {
    fn new(engine: &mut Engine) -> Result<Self, GameError> {
        let mut world = PhysicsWorld::with_gravity(GRAVITY);
        let debris = Debris::spawn(&mut world, debris_start(VIEW_SIZE));

        let ship_position = VIEW_SIZE / 2.0;
        let mesh = engine.load_mesh(SHIP_MESH, mesh_position(ship_position), SHIP_MESH_SIZE)?;
        let ship = Ship::spawn(&mut world, ship_position, mesh)?;

        Ok(Self {
            world,
            timestep: FixedTimestep::new(),
            ship,
            debris: Some(debris),
            touch: TouchTracker::new(ship_position),
            watches: MeshRotateWatches::register(engine),
            debug_draw: DebugDraw::new(VIEW_SIZE),
            viewport: engine.viewport(),
            hit_count: 0,
        })
    }

    fn reset_debris(&mut self) {
        if let Some(debris) = self.debris.take() {
            debris.despawn(&mut self.world);
        }
        self.debris = Some(Debris::spawn(&mut self.world, debris_start(VIEW_SIZE)));
        log::info!("Debris reset");
    }

    fn count_hits(&mut self) {
        let Some(debris) = &self.debris else {
            self.world.drain_collision_events();
            return;
        };

        let ship = self.ship.collider();
        let debris = debris.collider();
        for event in self.world.drain_collision_events() {
            if event.started_between(ship, debris) {
                self.hit_count += 1;
                log::info!("Debris hit the ship ({} hits)", self.hit_count);
            } else if let CollisionEvent::Stopped { .. } = event {
                log::debug!("Contact ended");
            }
        }
    }
}

impl FrameHooks for Scene {
    fn pre_draw(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn post_draw(&mut self, post: PostDraw<'_>) {
        self.debug_draw.set_screen_viewport(self.viewport);
        if post.physics_debug {
            self.debug_draw.begin();
            self.debug_draw.draw_world(&self.world);
            post.overlay.extend_from_slice(self.debug_draw.end());
        }
    }
}

/// The debris dodger application
pub struct Application {
    engine: Option<Engine>,
    scene: Scene,
}

impl Application {
    /// Build the application around an engine context
    ///
    /// Returns `None` (after logging) when there is no context or the scene
    /// can't be set up.
    pub fn create(engine: Option<Engine>) -> Option<Self> {
        let Some(mut engine) = engine else {
            log::error!("Engine context could not be found");
            return None;
        };

        engine.set_clear_color(CLEAR_COLOR);
        engine.configure_view(VIEW_SIZE);
        engine.set_near_far_planes(0.1, 1000.0);
        engine.set_camera_position(Vec3::new(0.0, 0.0, -1.0));
        engine.set_camera_direction(Vec3::Z);
        engine.set_ambient_light_color(Vec3::ONE);

        match Scene::new(&mut engine) {
            Ok(scene) => {
                log::info!("Application initialized");
                Some(Self {
                    engine: Some(engine),
                    scene,
                })
            }
            Err(e) => {
                log::error!("Failed to initialize application: {}", e);
                engine.destroy();
                None
            }
        }
    }

    /// Advance one frame
    pub fn update(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !engine.begin_frame() {
            return;
        }
        let scene = &mut self.scene;

        if engine.action_pressed(Action::Pause) {
            engine.toggle_pause();
        }
        if engine.action_pressed(Action::TogglePhysicsDebug) {
            engine.toggle_physics_debug();
        }
        if engine.action_pressed(Action::ResetDebris) {
            scene.reset_debris();
        }
        if engine.action_pressed(Action::NextWatch) {
            engine.watches_mut().select_next();
        }
        if engine.action_pressed(Action::WatchDecrease) {
            engine.watches_mut().nudge_selected(-1);
        }
        if engine.action_pressed(Action::WatchIncrease) {
            engine.watches_mut().nudge_selected(1);
        }

        // Touches queued since the last frame, in arrival order
        let ship_position = scene.ship.position();
        for event in engine.input_mut().drain_touches() {
            scene
                .touch
                .handle(&event, |p| engine.viewport_map(p), ship_position);
        }

        let keys = ArrowKeys {
            up: engine.is_action_down(Action::MoveUp),
            down: engine.is_action_down(Action::MoveDown),
            left: engine.is_action_down(Action::MoveLeft),
            right: engine.is_action_down(Action::MoveRight),
        };
        scene
            .ship
            .steer(&mut scene.world, keys, scene.touch.target());

        scene.timestep.accumulate(engine.frame_delta());
        scene.timestep.catch_up(&mut scene.world);
        scene.count_hits();

        let ship_position = scene.ship.clamp_to_view(&mut scene.world, VIEW_SIZE);
        if keys.any() {
            scene.touch.set_target(ship_position);
        }

        let mesh = scene.ship.mesh();
        let watches = engine.watches();
        let rotation = mesh_rotation(
            watches.value(scene.watches.x),
            watches.value(scene.watches.y),
            watches.value(scene.watches.z),
        );
        if let Err(e) = engine
            .set_mesh_position(mesh, mesh_position(ship_position))
            .and_then(|()| engine.set_mesh_rotation(mesh, rotation))
        {
            log::warn!("Ship mesh not updated: {}", e);
        }

        if let Some(debris) = scene.debris.as_mut() {
            engine.draw_sprite(debris.sync_sprite(&scene.world));
        }

        engine.end_frame(scene);
    }

    /// Release the engine context; later calls do nothing
    pub fn destroy(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
            log::info!("Application destroyed");
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.engine.is_none()
    }

    /// Whether the user asked to quit this frame
    pub fn quit_requested(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| engine.is_action_down(Action::Quit))
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut Engine> {
        self.engine.as_mut()
    }

    /// Times the debris has run into the ship
    pub fn hit_count(&self) -> u32 {
        self.scene.hit_count
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FrameClock;
    use crate::game::ship::KEY_SPEED_X;
    use crate::engine::input::TouchPhase;
    use approx::assert_relative_eq;
    use std::time::Duration;
    use winit::keyboard::KeyCode;

    impl Application {
        fn touch_target(&self) -> Vec2 {
            self.scene.touch.target()
        }

        fn ship_position(&self) -> Vec2 {
            self.scene.ship.position()
        }

        fn ship_velocity(&self) -> Vec2 {
            self.scene.ship.velocity()
        }

        fn debris_position(&self) -> Option<Vec2> {
            self.scene
                .debris
                .as_ref()
                .and_then(|debris| debris.position(&self.scene.world))
        }

        fn step_count(&self) -> u64 {
            self.scene.world.step_count()
        }

        fn frame_delta(&self) -> f64 {
            self.engine().map_or(0.0, Engine::frame_delta)
        }
    }

    /// 800x400 window: 40 pixels per view unit, scissor covers everything
    fn app_with_frame_time(seconds: f64) -> Application {
        let clock = FrameClock::with_fixed_frame_time(Duration::from_secs_f64(seconds));
        Application::create(Some(Engine::new(800, 400, clock))).unwrap()
    }

    fn app() -> Application {
        app_with_frame_time(1.0 / 60.0)
    }

    fn touch(app: &mut Application, id: u64, phase: TouchPhase, x: f32, y: f32) {
        app.engine_mut()
            .unwrap()
            .process_touch(id, phase, Vec2::new(x, y));
    }

    fn key(app: &mut Application, code: KeyCode, pressed: bool) {
        app.engine_mut()
            .unwrap()
            .input_mut()
            .process_key(code, pressed, false);
    }

    #[test]
    fn test_create_without_engine_returns_none() {
        assert!(Application::create(None).is_none());
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.ship_position(), Vec2::new(10.0, 5.0));
        assert_eq!(app.touch_target(), Vec2::new(10.0, 5.0));
        assert_eq!(app.debris_position(), Some(Vec2::new(20.0, 5.1)));
        assert_eq!(app.step_count(), 0);
        let watches = app.engine().unwrap().watches();
        assert_relative_eq!(watches.value(app.scene.watches.x), 0.0);
        assert_relative_eq!(watches.value(app.scene.watches.y), PI * 3.0 / 2.0, epsilon = 1e-5);
        assert_relative_eq!(watches.value(app.scene.watches.z), 0.0);
    }

    #[test]
    fn test_touch_start_sets_target() {
        let mut app = app();
        touch(&mut app, 1, TouchPhase::Start, 400.0, 100.0);
        app.update();

        assert_relative_eq!(app.touch_target().x, 10.0);
        assert_relative_eq!(app.touch_target().y, 2.5);
    }

    #[test]
    fn test_touch_move_from_other_id_ignored() {
        let mut app = app();
        touch(&mut app, 1, TouchPhase::Start, 400.0, 100.0);
        touch(&mut app, 2, TouchPhase::Move, 40.0, 40.0);
        app.update();

        assert_relative_eq!(app.touch_target().x, 10.0);
        assert_relative_eq!(app.touch_target().y, 2.5);
    }

    #[test]
    fn test_touch_end_resets_target_to_ship() {
        let mut app = app();
        touch(&mut app, 1, TouchPhase::Start, 400.0, 100.0);
        app.update();
        touch(&mut app, 1, TouchPhase::End, 400.0, 100.0);
        app.update();

        // The target was reset to the ship position before this frame's step
        let velocity = app.ship_velocity();
        assert!(velocity.length() < 0.1);
    }

    #[test]
    fn test_touch_velocity_points_at_target() {
        let mut app = app();
        touch(&mut app, 1, TouchPhase::Start, 600.0, 200.0);
        app.update();

        // Target (15, 5) from (10, 5)
        assert_relative_eq!(app.ship_velocity().x, 5.0);
        assert_relative_eq!(app.ship_velocity().y, 0.0);
    }

    #[test]
    fn test_arrow_keys_set_constant_velocity() {
        let mut app = app();
        key(&mut app, KeyCode::ArrowRight, true);
        key(&mut app, KeyCode::ArrowDown, true);
        app.update();

        assert_eq!(app.ship_velocity(), Vec2::new(6.0, 3.0));
        // Key steering drags the touch target along with the ship
        assert_eq!(app.touch_target(), app.ship_position());
    }

    #[test]
    fn test_key_keeps_velocity_on_other_axis() {
        let mut app = app();
        touch(&mut app, 1, TouchPhase::Start, 400.0, 300.0);
        app.update();
        // Target (10, 7.5) from (10, 5)
        assert_relative_eq!(app.ship_velocity().y, 2.5);

        key(&mut app, KeyCode::ArrowRight, true);
        app.update();
        assert_relative_eq!(app.ship_velocity().x, KEY_SPEED_X);
        assert_relative_eq!(app.ship_velocity().y, 2.5);
    }

    #[test]
    fn test_ship_stays_in_view() {
        let mut app = app_with_frame_time(0.1);
        key(&mut app, KeyCode::ArrowRight, true);
        key(&mut app, KeyCode::ArrowUp, true);
        for _ in 0..40 {
            app.update();
            let position = app.ship_position();
            assert!((1.0..=19.0).contains(&position.x));
            assert!((1.0..=9.0).contains(&position.y));
        }
        assert_relative_eq!(app.ship_position().x, 19.0);
        assert_relative_eq!(app.ship_position().y, 1.0);
    }

    #[test]
    fn test_step_count_catches_up() {
        let mut app = app_with_frame_time(0.125);
        app.update();
        assert_eq!(app.step_count(), 8);

        app.update();
        assert_eq!(app.step_count(), 15);
    }

    #[test]
    fn test_step_count_is_ceil_of_real_time() {
        // A 1/60 s frame is a hair over one step once stored as a Duration
        let mut app = app();
        let mut real_time = 0.0;
        for _ in 0..3 {
            app.update();
            real_time += app.frame_delta();
            assert_eq!(app.step_count(), (real_time * 60.0).ceil() as u64);
        }
    }

    #[test]
    fn test_paused_frames_do_not_step() {
        let mut app = app_with_frame_time(0.05);
        key(&mut app, KeyCode::KeyP, true);
        app.update();
        assert!(app.engine().unwrap().is_paused());
        assert_eq!(app.step_count(), 3);

        app.update();
        app.update();
        assert_eq!(app.frame_delta(), 0.0);
        assert_eq!(app.step_count(), 3);
    }

    #[test]
    fn test_debris_hits_are_counted() {
        let mut app = app_with_frame_time(0.05);
        assert_eq!(app.hit_count(), 0);
        for _ in 0..160 {
            app.update();
        }
        assert!(app.hit_count() >= 1);
    }

    #[test]
    fn test_reset_debris_moves_it_back() {
        let mut app = app_with_frame_time(0.5);
        app.update();
        let drifted = app.debris_position().unwrap();
        assert!(drifted.x < 20.0);

        // Reset happens before stepping, so the new box drifts for one frame only
        key(&mut app, KeyCode::KeyR, true);
        app.update();
        let reset = app.debris_position().unwrap();
        assert_relative_eq!(reset.x, drifted.x, epsilon = 1e-3);

        app.update();
        assert!(app.debris_position().unwrap().x < reset.x);
    }

    #[test]
    fn test_watch_nudge_changes_slider() {
        let mut app = app();
        key(&mut app, KeyCode::BracketRight, true);
        app.update();

        let watches = app.engine().unwrap().watches();
        let selected = watches.selected().unwrap();
        assert_relative_eq!(watches.value(selected), TAU / 360.0, epsilon = 1e-5);
    }

    #[test]
    fn test_frame_draws_debris_and_ship() {
        let mut app = app();
        app.update();

        let draw_list = app.engine().unwrap().draw_list();
        assert_eq!(draw_list.clear_color, CLEAR_COLOR);
        assert!(draw_list.scene_lines.len() >= 6);
        assert!(draw_list.overlay_lines.is_empty());
    }

    #[test]
    fn test_physics_debug_overlay() {
        let mut app = app();
        key(&mut app, KeyCode::F1, true);
        app.update();

        let engine = app.engine().unwrap();
        assert!(engine.physics_debug_enabled());
        // Box outline plus ship triangle
        assert_eq!(engine.draw_list().overlay_lines.len(), 7);
    }

    #[test]
    fn test_viewport_snapshot_is_scissor() {
        let mut app = app();
        app.update();
        let viewport = app.scene.viewport;
        assert_relative_eq!(viewport.width(), 800.0);
        assert_relative_eq!(viewport.height(), 400.0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut app = app();
        app.destroy();
        app.destroy();
        assert!(app.is_destroyed());

        let steps = app.step_count();
        app.update();
        assert_eq!(app.step_count(), steps);
    }

    #[test]
    fn test_quit_requested() {
        let mut app = app();
        assert!(!app.quit_requested());
        key(&mut app, KeyCode::Escape, true);
        assert!(app.quit_requested());
    }
}

// Engine context handed to the application
//
// Bundles the per-frame services the game talks to: frame clock, input,
// 2D view mapping, debug sliders, mesh instances, scene settings and the
// draw list the renderer consumes. It never touches the GPU, so it works
// the same with or without a window.

use glam::{Mat3, Vec2, Vec3, Vec4};
use std::time::Duration;

use super::game_loop::FrameClock;
use super::input::{Action, InputManager, TouchEvent, TouchPhase};
use super::renderer::{
    builtin_wireframe, placeholder_wireframe, push_polygon, Line, MeshHandle, MeshInstance,
    SceneCamera, ScreenRect, Sprite, ViewMapping, Viewport,
};
use super::watch::WatchRegistry;
use super::EngineError;
use crate::config::AppConfig;

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct DrawList {
    pub clear_color: Vec4,
    /// Scene lines are clipped to this rectangle
    pub scissor: ScreenRect,
    /// Sprites and meshes, in screen pixels
    pub scene_lines: Vec<Line>,
    /// Debug lines drawn over the whole window, in screen pixels
    pub overlay_lines: Vec<Line>,
}

impl DrawList {
    fn new(clear_color: Vec4, scissor: ScreenRect) -> Self {
        Self {
            clear_color,
            scissor,
            scene_lines: Vec::new(),
            overlay_lines: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.scene_lines.clear();
        self.overlay_lines.clear();
    }
}

/// State handed to the post-draw step
pub struct PostDraw<'a> {
    pub physics_debug: bool,
    pub overlay: &'a mut Vec<Line>,
}

/// Steps run while a frame is finished, in order:
/// pre-draw, (scene draw), post-renderer-draw, post-draw
pub trait FrameHooks {
    /// The scene viewport has been set from the scissor rectangle
    fn pre_draw(&mut self, _viewport: Viewport) {}

    /// The scene is drawn; the viewport is back to the full window
    fn post_renderer_draw(&mut self, _viewport: Viewport) {}

    /// Last chance to add overlay lines
    fn post_draw(&mut self, _post: PostDraw<'_>) {}
}

impl FrameHooks for () {}

/// Engine context owned by the application
pub struct Engine {
    clock: FrameClock,
    input: InputManager,
    view: ViewMapping,
    watches: WatchRegistry,
    meshes: Vec<MeshInstance>,
    camera: SceneCamera,
    ambient_light: Vec3,
    draw_list: DrawList,
    /// Current device viewport
    viewport: Viewport,
    physics_debug: bool,
    in_frame: bool,
    destroyed: bool,
}

impl Engine {
    /// Create an engine for a window of the given size
    ///
    /// The 2D view initially covers the window one unit per pixel.
    pub fn new(width: u32, height: u32, clock: FrameClock) -> Self {
        let screen = Vec2::new(width as f32, height as f32);
        let view = ViewMapping::new(screen, screen.x, screen.y);
        let clear_color = Vec4::new(0.0, 0.0, 0.0, 1.0);

        Self {
            clock,
            input: InputManager::default(),
            watches: WatchRegistry::new(),
            meshes: Vec::new(),
            camera: SceneCamera::default(),
            ambient_light: Vec3::ONE,
            draw_list: DrawList::new(clear_color, view.scissor()),
            viewport: Viewport::from_rect(ScreenRect::new(0.0, 0.0, screen.x, screen.y)),
            view,
            physics_debug: false,
            in_frame: false,
            destroyed: false,
        }
    }

    /// Create an engine from application settings
    pub fn from_config(config: &AppConfig) -> Self {
        let fixed = config
            .fixed_frame_time
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok());
        let clock = match fixed {
            Some(frame_time) => FrameClock::with_fixed_frame_time(frame_time),
            None => FrameClock::new(),
        };
        let mut engine = Self::new(config.window_width, config.window_height, clock);
        engine.physics_debug = config.enable_physics_debug;
        engine
    }

    /// Start a frame
    ///
    /// Returns false when nothing should be updated or drawn this frame
    /// (engine destroyed, or the window has no visible area).
    pub fn begin_frame(&mut self) -> bool {
        if self.destroyed {
            return false;
        }

        self.clock.begin_frame();
        if self.view.scissor().is_empty() {
            // No end_frame this time, so drop the edges here
            self.input.update();
            return false;
        }

        self.draw_list.clear();
        self.draw_list.scissor = self.view.scissor();
        self.in_frame = true;
        true
    }

    /// Finish the frame: run the draw steps and reset per-frame input
    pub fn end_frame(&mut self, hooks: &mut dyn FrameHooks) {
        if !self.in_frame {
            log::warn!("Engine::end_frame called without a matching begin_frame");
            return;
        }

        let scissor = self.view.scissor();
        self.viewport = Viewport::from_rect(scissor);
        hooks.pre_draw(self.viewport);

        self.draw_meshes(scissor);

        let screen = self.view.screen_size();
        self.viewport = Viewport::from_rect(ScreenRect::new(0.0, 0.0, screen.x, screen.y));
        hooks.post_renderer_draw(self.viewport);

        hooks.post_draw(PostDraw {
            physics_debug: self.physics_debug,
            overlay: &mut self.draw_list.overlay_lines,
        });

        self.input.update();
        self.in_frame = false;
    }

    fn draw_meshes(&mut self, target: ScreenRect) {
        let light = self.ambient_light.extend(1.0);
        for mesh in &self.meshes {
            let color = mesh.color * light;
            for (from, to) in mesh.project_edges(&self.camera, target) {
                self.draw_list.scene_lines.push(Line::new(from, to, color));
            }
        }
    }

    /// Seconds of real time covered by the current frame (0 while paused)
    pub fn frame_delta(&self) -> f64 {
        self.clock.delta()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    // Input

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Whether an action's key is held
    pub fn is_action_down(&self, action: Action) -> bool {
        self.input.is_pressed(action)
    }

    /// Whether an action's key went down this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.input.just_pressed(action)
    }

    /// Queue a touch; it is a game touch when it starts inside the scissor
    pub fn process_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        let is_game_touch = phase != TouchPhase::Start || self.view.scissor().contains(position);
        self.input
            .push_touch(TouchEvent::new(id, phase, position, is_game_touch));
    }

    /// Feed the left mouse button through the touch queue
    pub fn process_mouse_button(&mut self, pressed: bool) {
        let is_game_touch = self
            .view
            .scissor()
            .contains(self.input.cursor_position());
        self.input.process_mouse_button(pressed, is_game_touch);
    }

    // 2D view

    /// Set the size of the 2D view in view units
    pub fn configure_view(&mut self, view_size: Vec2) {
        self.view.set_view_size(view_size);
        log::debug!(
            "View configured to {}x{}, scissor {:?}",
            view_size.x,
            view_size.y,
            self.view.scissor()
        );
    }

    /// Map a screen position into view space
    pub fn viewport_map(&self, screen_pos: Vec2) -> Vec2 {
        self.view.screen_to_view(screen_pos)
    }

    /// Current device viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Window resized
    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.resize(width as f32, height as f32);
        self.viewport =
            Viewport::from_rect(ScreenRect::new(0.0, 0.0, width as f32, height as f32));
        log::info!("Engine resized to {}x{}", width, height);
    }

    /// Draw a sprite; textures are shown as an outlined crate
    pub fn draw_sprite(&mut self, sprite: &Sprite) {
        let corners = sprite
            .corners()
            .map(|corner| self.view.view_to_screen(corner));
        let lines = &mut self.draw_list.scene_lines;
        push_polygon(lines, &corners, sprite.color);
        lines.push(Line::new(corners[0], corners[2], sprite.color));
        lines.push(Line::new(corners[1], corners[3], sprite.color));
    }

    // Scene

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.draw_list.clear_color = color;
    }

    pub fn set_near_far_planes(&mut self, near: f32, far: f32) {
        self.camera.near = near;
        self.camera.far = far;
    }

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera.position = position;
    }

    pub fn set_camera_direction(&mut self, direction: Vec3) {
        self.camera.direction = direction.normalize_or_zero();
    }

    pub fn set_ambient_light_color(&mut self, color: Vec3) {
        self.ambient_light = color;
    }

    /// Place a named mesh in the scene
    ///
    /// Unknown names get a placeholder wireframe.
    pub fn load_mesh(
        &mut self,
        name: &str,
        position: Vec3,
        size: Vec3,
    ) -> Result<MeshHandle, EngineError> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }

        let wireframe = builtin_wireframe(name).unwrap_or_else(|| {
            log::warn!("Mesh '{}' not found, using placeholder", name);
            placeholder_wireframe()
        });
        self.meshes
            .push(MeshInstance::new(name, wireframe, position, size));
        log::debug!("Loaded mesh '{}'", name);
        Ok(MeshHandle(self.meshes.len() - 1))
    }

    fn mesh_mut(&mut self, handle: MeshHandle) -> Result<&mut MeshInstance, EngineError> {
        self.meshes
            .get_mut(handle.0)
            .ok_or(EngineError::UnknownMesh(handle.0))
    }

    pub fn set_mesh_position(
        &mut self,
        handle: MeshHandle,
        position: Vec3,
    ) -> Result<(), EngineError> {
        self.mesh_mut(handle)?.position = position;
        Ok(())
    }

    pub fn set_mesh_rotation(
        &mut self,
        handle: MeshHandle,
        rotation: Mat3,
    ) -> Result<(), EngineError> {
        self.mesh_mut(handle)?.rotation = rotation;
        Ok(())
    }

    // Debug

    pub fn watches(&self) -> &WatchRegistry {
        &self.watches
    }

    pub fn watches_mut(&mut self) -> &mut WatchRegistry {
        &mut self.watches
    }

    #[cfg(test)]
    pub fn physics_debug_enabled(&self) -> bool {
        self.physics_debug
    }

    pub fn toggle_physics_debug(&mut self) -> bool {
        self.physics_debug = !self.physics_debug;
        log::info!(
            "Physics debug {}",
            if self.physics_debug { "on" } else { "off" }
        );
        self.physics_debug
    }

    /// The frame most recently finished
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Release everything; the engine does nothing afterwards
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.meshes.clear();
        self.draw_list.clear();
        self.input.reset();
        self.destroyed = true;
        log::info!("Engine destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use winit::keyboard::KeyCode;

    fn headless(width: u32, height: u32) -> Engine {
        Engine::new(
            width,
            height,
            FrameClock::with_fixed_frame_time(Duration::from_millis(16)),
        )
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        pre_viewport: Option<Viewport>,
        post_viewport: Option<Viewport>,
        physics_debug: Option<bool>,
    }

    impl FrameHooks for Recorder {
        fn pre_draw(&mut self, viewport: Viewport) {
            self.calls.push("pre_draw");
            self.pre_viewport = Some(viewport);
        }

        fn post_renderer_draw(&mut self, viewport: Viewport) {
            self.calls.push("post_renderer_draw");
            self.post_viewport = Some(viewport);
        }

        fn post_draw(&mut self, post: PostDraw<'_>) {
            self.calls.push("post_draw");
            self.physics_debug = Some(post.physics_debug);
            post.overlay
                .push(Line::new(Vec2::ZERO, Vec2::ONE, Vec4::ONE));
        }
    }

    #[test]
    fn test_frame_runs_hooks_in_order() {
        let mut engine = headless(800, 600);
        engine.configure_view(Vec2::new(20.0, 10.0));
        let mut hooks = Recorder::default();

        assert!(engine.begin_frame());
        engine.end_frame(&mut hooks);

        assert_eq!(
            hooks.calls,
            vec!["pre_draw", "post_renderer_draw", "post_draw"]
        );
        // 20x10 in 800x600 letterboxes to 800x400 starting at y = 100
        let pre = hooks.pre_viewport.unwrap();
        assert_relative_eq!(pre.min.y, 100.0);
        assert_relative_eq!(pre.max.y, 500.0);
        let post = hooks.post_viewport.unwrap();
        assert_relative_eq!(post.min.y, 0.0);
        assert_relative_eq!(post.max.y, 600.0);
        assert_eq!(hooks.physics_debug, Some(false));
        assert_eq!(engine.draw_list().overlay_lines.len(), 1);
    }

    #[test]
    fn test_begin_frame_clears_previous_lines() {
        let mut engine = headless(800, 400);
        engine.begin_frame();
        engine.draw_sprite(&Sprite::new("textures/crate.jpg", Vec2::ZERO, Vec2::ONE));
        engine.end_frame(&mut ());
        assert_eq!(engine.draw_list().scene_lines.len(), 6);

        engine.begin_frame();
        assert!(engine.draw_list().scene_lines.is_empty());
    }

    #[test]
    fn test_empty_window_skips_frame() {
        let mut engine = headless(0, 0);
        assert!(!engine.begin_frame());
    }

    #[test]
    fn test_skipped_frame_drops_key_edges() {
        let mut engine = headless(0, 0);
        engine.input_mut().process_key(KeyCode::KeyP, true, false);
        assert!(!engine.begin_frame());

        // Restored: the press is still held but no longer new
        engine.resize(800, 400);
        assert!(engine.begin_frame());
        assert!(engine.is_action_down(Action::Pause));
        assert!(!engine.action_pressed(Action::Pause));
    }

    #[test]
    fn test_meshes_lit_by_ambient_light() {
        let mut engine = headless(800, 400);
        engine
            .load_mesh("models/missing.dae", Vec3::ZERO, Vec3::ONE)
            .unwrap();
        engine.set_ambient_light_color(Vec3::new(0.5, 0.5, 0.5));

        engine.begin_frame();
        engine.end_frame(&mut ());

        let base = engine.meshes[0].color;
        let line = engine.draw_list().scene_lines[0];
        assert_relative_eq!(line.color.x, base.x * 0.5);
        assert_relative_eq!(line.color.w, base.w);
    }

    #[test]
    fn test_destroyed_engine_skips_frame() {
        let mut engine = headless(800, 400);
        engine.destroy();
        engine.destroy();
        assert!(engine.destroyed);
        assert!(!engine.begin_frame());
        assert!(matches!(
            engine.load_mesh("models/ship.dae", Vec3::ZERO, Vec3::ONE),
            Err(EngineError::Destroyed)
        ));
    }

    #[test]
    fn test_touch_outside_scissor_is_not_game_touch() {
        let mut engine = headless(800, 600);
        engine.configure_view(Vec2::new(20.0, 10.0));

        engine.process_touch(1, TouchPhase::Start, Vec2::new(400.0, 50.0));
        engine.process_touch(2, TouchPhase::Start, Vec2::new(400.0, 300.0));
        engine.process_touch(1, TouchPhase::End, Vec2::new(400.0, 50.0));

        let touches = engine.input_mut().drain_touches();
        assert!(!touches[0].is_game_touch);
        assert!(touches[1].is_game_touch);
        assert!(touches[2].is_game_touch);
    }

    #[test]
    fn test_viewport_map() {
        let mut engine = headless(800, 400);
        engine.configure_view(Vec2::new(20.0, 10.0));
        let view = engine.viewport_map(Vec2::new(400.0, 100.0));
        assert_relative_eq!(view.x, 10.0);
        assert_relative_eq!(view.y, 2.5);
    }

    #[test]
    fn test_unknown_mesh_uses_placeholder() {
        let mut engine = headless(800, 400);
        let handle = engine
            .load_mesh("models/missing.dae", Vec3::ZERO, Vec3::ONE)
            .unwrap();
        assert_eq!(engine.meshes[handle.0].name, "models/missing.dae");
    }

    #[test]
    fn test_mesh_transform() {
        let mut engine = headless(800, 400);
        let handle = engine
            .load_mesh("models/ship.dae", Vec3::ZERO, Vec3::splat(3.0))
            .unwrap();

        engine
            .set_mesh_position(handle, Vec3::new(0.0, 0.05, 0.0))
            .unwrap();
        engine
            .set_mesh_rotation(handle, Mat3::from_rotation_y(1.0))
            .unwrap();

        let mesh = &engine.meshes[handle.0];
        assert_relative_eq!(mesh.position.y, 0.05);
        assert_eq!(mesh.rotation, Mat3::from_rotation_y(1.0));
        assert!(matches!(
            engine.set_mesh_position(MeshHandle(7), Vec3::ZERO),
            Err(EngineError::UnknownMesh(7))
        ));
    }

    #[test]
    fn test_toggle_physics_debug() {
        let mut engine = headless(800, 400);
        assert!(!engine.physics_debug_enabled());
        assert!(engine.toggle_physics_debug());
        assert!(!engine.toggle_physics_debug());
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig {
            enable_physics_debug: true,
            fixed_frame_time: Some(0.125),
            ..AppConfig::default()
        };
        let mut engine = Engine::from_config(&config);
        assert!(engine.physics_debug_enabled());
        engine.begin_frame();
        assert_relative_eq!(engine.frame_delta(), 0.125);
    }
}

// 2D view mapping: fits a fixed-size view into the window and converts
// between screen pixels and view units

use glam::Vec2;

/// Axis-aligned rectangle in screen pixels, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside the rectangle (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Maps a fixed view rectangle onto the window, preserving aspect ratio
///
/// The view is scaled uniformly to the largest size that fits and centred,
/// leaving letterbox bars on the remaining sides. The area the view covers is
/// the scissor rectangle.
#[derive(Debug, Clone)]
pub struct ViewMapping {
    /// View size in view units
    view_size: Vec2,
    /// Window size in pixels
    screen_size: Vec2,
    /// Pixels per view unit
    scale: f32,
    /// Window area covered by the view
    scissor: ScreenRect,
}

impl ViewMapping {
    /// Create a mapping for a view of `view_size` units inside a window
    pub fn new(view_size: Vec2, screen_width: f32, screen_height: f32) -> Self {
        let mut mapping = Self {
            view_size,
            screen_size: Vec2::new(screen_width, screen_height),
            scale: 1.0,
            scissor: ScreenRect::new(0.0, 0.0, screen_width, screen_height),
        };
        mapping.update_scissor();
        mapping
    }

    fn update_scissor(&mut self) {
        if self.view_size.x <= 0.0 || self.view_size.y <= 0.0 {
            self.scale = 0.0;
            self.scissor = ScreenRect::new(0.0, 0.0, 0.0, 0.0);
            return;
        }

        self.scale = (self.screen_size.x / self.view_size.x)
            .min(self.screen_size.y / self.view_size.y)
            .max(0.0);
        let size = self.view_size * self.scale;
        let offset = (self.screen_size - size) * 0.5;
        self.scissor = ScreenRect::new(offset.x, offset.y, size.x, size.y);
    }

    /// Resize the window
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.screen_size = Vec2::new(screen_width, screen_height);
        self.update_scissor();
    }

    /// Change the view size
    pub fn set_view_size(&mut self, view_size: Vec2) {
        self.view_size = view_size;
        self.update_scissor();
    }

    /// Convert screen coordinates to view coordinates
    pub fn screen_to_view(&self, screen_pos: Vec2) -> Vec2 {
        if self.scale <= 0.0 {
            return Vec2::ZERO;
        }
        (screen_pos - Vec2::new(self.scissor.x, self.scissor.y)) / self.scale
    }

    /// Convert view coordinates to screen coordinates
    pub fn view_to_screen(&self, view_pos: Vec2) -> Vec2 {
        Vec2::new(self.scissor.x, self.scissor.y) + view_pos * self.scale
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Window area covered by the view
    pub fn scissor(&self) -> ScreenRect {
        self.scissor
    }
}

/// Viewport bounds in screen pixels, snapshotted once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    pub fn from_rect(rect: ScreenRect) -> Self {
        Self {
            min: Vec2::new(rect.x, rect.y),
            max: Vec2::new(rect.x + rect.width, rect.y + rect.height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_aspect_fills_window() {
        let mapping = ViewMapping::new(Vec2::new(20.0, 10.0), 800.0, 400.0);
        assert_eq!(mapping.scissor(), ScreenRect::new(0.0, 0.0, 800.0, 400.0));
        assert_eq!(
            mapping.screen_to_view(Vec2::new(400.0, 100.0)),
            Vec2::new(10.0, 2.5)
        );
    }

    #[test]
    fn test_tall_window_is_letterboxed() {
        // 800x800 window, 20x10 view: scale 40, 200px bars top and bottom
        let mapping = ViewMapping::new(Vec2::new(20.0, 10.0), 800.0, 800.0);
        assert_eq!(mapping.scissor(), ScreenRect::new(0.0, 200.0, 800.0, 400.0));
        assert_eq!(
            mapping.screen_to_view(Vec2::new(0.0, 200.0)),
            Vec2::new(0.0, 0.0)
        );
        assert!(!mapping.scissor().contains(Vec2::new(400.0, 100.0)));
    }

    #[test]
    fn test_round_trip_through_screen() {
        let mapping = ViewMapping::new(Vec2::new(20.0, 10.0), 1280.0, 720.0);
        let view = Vec2::new(3.0, 7.5);
        let back = mapping.screen_to_view(mapping.view_to_screen(view));
        assert!((back - view).length() < 1e-4);
    }

    #[test]
    fn test_resize_updates_scissor() {
        let mut mapping = ViewMapping::new(Vec2::new(20.0, 10.0), 800.0, 400.0);
        mapping.resize(1600.0, 400.0);
        assert_eq!(mapping.scissor(), ScreenRect::new(400.0, 0.0, 800.0, 400.0));
    }

    #[test]
    fn test_zero_sized_window() {
        let mapping = ViewMapping::new(Vec2::new(20.0, 10.0), 0.0, 0.0);
        assert!(mapping.scissor().is_empty());
        assert_eq!(mapping.screen_to_view(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }

    #[test]
    fn test_viewport_from_rect() {
        let viewport = Viewport::from_rect(ScreenRect::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(viewport.min, Vec2::new(10.0, 20.0));
        assert_eq!(viewport.max, Vec2::new(110.0, 70.0));
        assert_eq!(viewport.width(), 100.0);
        assert_eq!(viewport.height(), 50.0);
    }
}

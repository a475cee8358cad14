// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a point into the rectangle `[min, max]`, inset by `margin` on every side
pub fn clamp_inset(point: Vec2, min: Vec2, max: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        clamp(point.x, min.x + margin, max.x - margin),
        clamp(point.y, min.y + margin, max.y - margin),
    )
}

/// Snap a value to the nearest multiple of `step` measured from `origin`
pub fn snap(value: f32, origin: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    origin + ((value - origin) / step).round() * step
}

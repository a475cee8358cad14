// Application settings, with environment overrides

use std::str::FromStr;

const ENV_PHYSICS_DEBUG: &str = "DEBRIS_DODGER_PHYSICS_DEBUG";
const ENV_FPS: &str = "DEBRIS_DODGER_FPS";
const ENV_WINDOW_SIZE: &str = "DEBRIS_DODGER_WINDOW_SIZE";
const ENV_FIXED_DT: &str = "DEBRIS_DODGER_FIXED_DT";

/// Startup settings for the application
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Target frame rate
    pub fps: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// Draw collider outlines over the scene
    pub enable_physics_debug: bool,
    /// Seconds per frame instead of the real clock (deterministic runs)
    pub fixed_frame_time: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            window_width: 1280,
            window_height: 720,
            enable_physics_debug: false,
            fixed_frame_time: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `DEBRIS_DODGER_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key
    ///
    /// Malformed values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_PHYSICS_DEBUG) {
            match parse_flag(&value) {
                Some(enabled) => config.enable_physics_debug = enabled,
                None => warn_invalid(ENV_PHYSICS_DEBUG, &value),
            }
        }

        if let Some(value) = lookup(ENV_FPS) {
            match parse_positive::<u32>(&value) {
                Some(fps) => config.fps = fps,
                None => warn_invalid(ENV_FPS, &value),
            }
        }

        if let Some(value) = lookup(ENV_WINDOW_SIZE) {
            match parse_size(&value) {
                Some((width, height)) => {
                    config.window_width = width;
                    config.window_height = height;
                }
                None => warn_invalid(ENV_WINDOW_SIZE, &value),
            }
        }

        if let Some(value) = lookup(ENV_FIXED_DT) {
            match parse_positive::<f64>(&value) {
                Some(seconds) if seconds.is_finite() => config.fixed_frame_time = Some(seconds),
                _ => warn_invalid(ENV_FIXED_DT, &value),
            }
        }

        config
    }

    /// Time budget for one frame at the target frame rate
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

fn warn_invalid(key: &str, value: &str) {
    log::warn!("Ignoring invalid value {:?} for {}", value, key);
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_positive<T>(value: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|parsed| *parsed > T::default())
}

/// Parse `WIDTHxHEIGHT`
fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.trim().split_once(['x', 'X'])?;
    Some((parse_positive(width)?, parse_positive(height)?))
}

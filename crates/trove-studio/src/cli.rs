use std::path::PathBuf;

use clap::Parser;

use trove_engine::game::GameRules;
use trove_engine::logging::LoggingConfig;
use trove_gesture::GestureConfig;

/// Upper bound for `--targets`; every target is a scene object and a score pip.
pub const MAX_TARGETS: i64 = 64;

/// Tap-to-find treasure hunt in a 3D viewer.
///
/// Drag to rotate, pinch or scroll to zoom, double-tap to reset the view.
/// Space starts a round, R restarts, A tries AR, Esc quits.
#[derive(Parser, Debug)]
#[command(name = "trove", version)]
pub struct Cli {
    /// Model to hunt for (Wavefront .obj); a placeholder is used if missing
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Number of targets to find
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(0..=MAX_TARGETS))]
    pub targets: u32,

    /// Round length in seconds
    #[arg(long, default_value_t = 30)]
    pub time_limit: u32,

    /// Smallest zoom scale
    #[arg(long, default_value_t = 0.1)]
    pub min_scale: f32,

    /// Largest zoom scale
    #[arg(long, default_value_t = 2.0)]
    pub max_scale: f32,

    /// Rotation per dragged pixel, in radians
    #[arg(long, default_value_t = 0.01)]
    pub sensitivity: f32,

    /// Idle spin in radians per second; 0 disables it
    #[arg(long, default_value_t = 0.3)]
    pub auto_rotate: f32,

    /// Log filter (env_logger syntax); falls back to RUST_LOG
    #[arg(long)]
    pub log: Option<String>,

    /// Try to start in AR mode
    #[arg(long)]
    pub ar: bool,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,
}

impl Cli {
    pub fn rules(&self) -> GameRules {
        GameRules::default()
            .targets(self.targets)
            .time_limit_secs(self.time_limit)
    }

    /// Gesture settings; the default scale is pulled into the requested range.
    pub fn gesture_config(&self) -> GestureConfig {
        let base = GestureConfig::default();
        let lo = self.min_scale.min(self.max_scale);
        let hi = self.max_scale.max(self.min_scale);
        // Non-finite bounds are left for `validate` to report.
        let default = if lo.is_finite() && hi.is_finite() {
            base.default_scale.clamp(lo, hi)
        } else {
            base.default_scale
        };
        base.scale_range(self.min_scale, self.max_scale)
            .default_scale(default)
            .rotation_sensitivity(self.sensitivity)
            .auto_rotate_speed(self.auto_rotate)
    }

    pub fn logging(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }
}

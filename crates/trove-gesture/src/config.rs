use std::fmt;
use std::time::Duration;

/// Tuning knobs for [`GestureInterpreter`](crate::GestureInterpreter).
///
/// Defaults reproduce the feel of the touch viewers this crate was built for:
/// the model rests at scale `0.5`, pinches clamp to `[0.1, 2.0]`, one pixel of
/// horizontal drag turns the model by `0.01` rad.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Resting scale; pinch/wheel zoom relaxes back to it.
    pub default_scale: f32,
    /// Radians per pixel of horizontal drag.
    pub rotation_sensitivity: f32,
    /// Horizontal excursion (px) above which a press becomes a drag.
    pub tap_movement_threshold: f32,
    pub double_tap_window: Duration,
    /// Fraction of the remaining distance covered per tick while settling.
    pub scale_smoothing_factor: f32,
    /// Scale change per pixel of wheel delta.
    pub wheel_sensitivity: f32,
    pub wheel_revert_delay: Duration,
    /// Settling snaps to the target once closer than this.
    pub settle_epsilon: f32,
    /// Idle spin in radians per second; `0.0` disables it. Paused while any
    /// contact is down.
    pub auto_rotate_speed: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 2.0,
            default_scale: 0.5,
            rotation_sensitivity: 0.01,
            tap_movement_threshold: 10.0,
            double_tap_window: Duration::from_millis(300),
            scale_smoothing_factor: 0.1,
            wheel_sensitivity: 0.001,
            wheel_revert_delay: Duration::from_millis(500),
            settle_epsilon: 1e-3,
            auto_rotate_speed: 0.0,
        }
    }
}

impl GestureConfig {
    pub fn scale_range(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    pub fn default_scale(mut self, scale: f32) -> Self {
        self.default_scale = scale;
        self
    }

    pub fn rotation_sensitivity(mut self, radians_per_px: f32) -> Self {
        self.rotation_sensitivity = radians_per_px;
        self
    }

    pub fn tap_movement_threshold(mut self, px: f32) -> Self {
        self.tap_movement_threshold = px;
        self
    }

    pub fn double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }

    pub fn scale_smoothing_factor(mut self, factor: f32) -> Self {
        self.scale_smoothing_factor = factor;
        self
    }

    pub fn wheel_sensitivity(mut self, per_px: f32) -> Self {
        self.wheel_sensitivity = per_px;
        self
    }

    pub fn wheel_revert_delay(mut self, delay: Duration) -> Self {
        self.wheel_revert_delay = delay;
        self
    }

    pub fn auto_rotate_speed(mut self, radians_per_sec: f32) -> Self {
        self.auto_rotate_speed = radians_per_sec;
        self
    }

    #[inline]
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Checks the configuration for values the interpreter cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("default_scale", self.default_scale),
            ("rotation_sensitivity", self.rotation_sensitivity),
            ("tap_movement_threshold", self.tap_movement_threshold),
            ("scale_smoothing_factor", self.scale_smoothing_factor),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("settle_epsilon", self.settle_epsilon),
            ("auto_rotate_speed", self.auto_rotate_speed),
        ];
        for (field, v) in finite {
            if !v.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        if self.min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveMinScale(self.min_scale));
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.default_scale < self.min_scale || self.default_scale > self.max_scale {
            return Err(ConfigError::DefaultOutOfRange {
                default: self.default_scale,
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.rotation_sensitivity < 0.0 {
            return Err(ConfigError::Negative { field: "rotation_sensitivity" });
        }
        if self.tap_movement_threshold < 0.0 {
            return Err(ConfigError::Negative { field: "tap_movement_threshold" });
        }
        if self.wheel_sensitivity < 0.0 {
            return Err(ConfigError::Negative { field: "wheel_sensitivity" });
        }
        if self.settle_epsilon < 0.0 {
            return Err(ConfigError::Negative { field: "settle_epsilon" });
        }
        if !(self.scale_smoothing_factor > 0.0 && self.scale_smoothing_factor <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(self.scale_smoothing_factor));
        }

        Ok(())
    }
}

/// Rejected [`GestureConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFinite { field: &'static str },
    Negative { field: &'static str },
    NonPositiveMinScale(f32),
    InvertedScaleRange { min: f32, max: f32 },
    DefaultOutOfRange { default: f32, min: f32, max: f32 },
    SmoothingOutOfRange(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => write!(f, "gesture config: `{field}` must be finite"),
            ConfigError::Negative { field } => {
                write!(f, "gesture config: `{field}` must not be negative")
            }
            ConfigError::NonPositiveMinScale(v) => {
                write!(f, "gesture config: min_scale must be > 0 (got {v})")
            }
            ConfigError::InvertedScaleRange { min, max } => {
                write!(f, "gesture config: min_scale {min} exceeds max_scale {max}")
            }
            ConfigError::DefaultOutOfRange { default, min, max } => write!(
                f,
                "gesture config: default_scale {default} outside [{min}, {max}]"
            ),
            ConfigError::SmoothingOutOfRange(v) => write!(
                f,
                "gesture config: scale_smoothing_factor must be in (0, 1] (got {v})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

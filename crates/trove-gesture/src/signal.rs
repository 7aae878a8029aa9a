use crate::Vec2;

/// Transform parameters of the displayed object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub scale: f32,
    /// Yaw in radians.
    pub rotation: f32,
}

/// Semantic output of the interpreter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureSignal {
    /// Completed tap. `ndc` is in `[-1, 1]` with +Y up; `screen` is the release point.
    Tap { ndc: Vec2, screen: Vec2 },
    /// Incremental yaw change in radians.
    Rotate { delta: f32 },
    ScaleChanged { scale: f32 },
    /// Scale and rotation returned to their defaults.
    Reset,
}

/// Receiver for interpreter output.
///
/// All methods default to no-ops so hosts implement only what they use.
pub trait GestureHandler {
    fn on_tap(&mut self, ndc: Vec2, screen: Vec2) {
        let _ = (ndc, screen);
    }

    fn on_rotate(&mut self, delta: f32) {
        let _ = delta;
    }

    fn on_scale_change(&mut self, scale: f32) {
        let _ = scale;
    }

    fn on_reset(&mut self) {}
}

/// Signals produced while processing one frame's worth of input.
///
/// The interpreter appends; the host drains once per frame.
#[derive(Debug, Default)]
pub struct GestureFrame {
    pub signals: Vec<GestureSignal>,
}

impl GestureFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.signals.clear();
    }

    #[inline]
    pub fn push(&mut self, signal: GestureSignal) {
        self.signals.push(signal);
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn taps(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.signals.iter().filter_map(|s| match s {
            GestureSignal::Tap { ndc, .. } => Some(*ndc),
            _ => None,
        })
    }

    /// Sum of all rotation deltas in this frame.
    pub fn total_rotation(&self) -> f32 {
        self.signals
            .iter()
            .map(|s| match s {
                GestureSignal::Rotate { delta } => *delta,
                _ => 0.0,
            })
            .sum()
    }

    /// Forwards every signal in arrival order.
    pub fn dispatch(&self, handler: &mut dyn GestureHandler) {
        for s in &self.signals {
            match *s {
                GestureSignal::Tap { ndc, screen } => handler.on_tap(ndc, screen),
                GestureSignal::Rotate { delta } => handler.on_rotate(delta),
                GestureSignal::ScaleChanged { scale } => handler.on_scale_change(scale),
                GestureSignal::Reset => handler.on_reset(),
            }
        }
    }
}

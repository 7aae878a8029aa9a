use std::time::Duration;

use crate::Vec2;

/// Identifier distinguishing simultaneous contacts.
///
/// Mouse input always uses [`PointerId::MOUSE`]; touch contacts use the
/// platform's finger id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointerId(pub u64);

impl PointerId {
    pub const MOUSE: PointerId = PointerId(u64::MAX);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerPhase {
    /// Contact started (finger down / primary button pressed).
    Down,
    Move,
    /// Contact ended normally.
    Up,
    /// Contact was aborted by the platform (focus loss, palm rejection).
    Cancel,
}

/// Low-level pointer event in logical pixels.
///
/// `time` is a monotonic timestamp measured from an arbitrary origin shared by
/// every event fed into one interpreter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub pos: Vec2,
    pub time: Duration,
}

impl PointerEvent {
    pub fn touch(id: u64, phase: PointerPhase, x: f32, y: f32, time: Duration) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Touch,
            phase,
            pos: Vec2::new(x, y),
            time,
        }
    }

    pub fn mouse(phase: PointerPhase, x: f32, y: f32, time: Duration) -> Self {
        Self {
            id: PointerId::MOUSE,
            kind: PointerKind::Mouse,
            phase,
            pos: Vec2::new(x, y),
            time,
        }
    }
}

/// Scroll-wheel input.
///
/// `delta_y` is in logical pixels; positive means "scroll down", which zooms out.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f32,
    pub time: Duration,
}

use std::time::Duration;

use crate::config::{ConfigError, GestureConfig};
use crate::pointer::{PointerEvent, PointerId, PointerPhase, WheelEvent};
use crate::signal::{GestureFrame, GestureSignal, Transform};
use crate::Vec2;

/// Pinch contacts closer than this (px) cannot define a usable ratio.
const MIN_PINCH_DISTANCE: f32 = 1.0;

/// Coarse state exposed to hosts (e.g. for cursor feedback).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Pinching,
}

#[derive(Debug, Copy, Clone)]
struct Contact {
    id: PointerId,
    pos: Vec2,
}

#[derive(Debug, Copy, Clone)]
struct Drag {
    id: PointerId,
    start: Vec2,
    /// X of the last sample that produced a rotation (the press point until latched).
    last_x: f32,
    /// Horizontal excursion exceeded the tap threshold at some point.
    latched: bool,
    /// Cleared for drags that survive a pinch; those never become taps.
    tap_eligible: bool,
}

#[derive(Debug, Copy, Clone)]
struct Pinch {
    a: PointerId,
    b: PointerId,
    initial_distance: f32,
    baseline_scale: f32,
}

#[derive(Debug, Copy, Clone)]
enum Mode {
    Idle,
    Dragging(Drag),
    Pinching(Pinch),
}

/// Turns raw pointer, wheel and tick input into taps, rotation and scale.
///
/// One instance per hosting view. All state (contacts, pinch baseline, timers,
/// current transform) is owned here; nothing is global. Call [`dispose`] when
/// the view is torn down.
///
/// Output is appended to a caller-owned [`GestureFrame`], mirroring how input
/// deltas are collected per frame elsewhere in the engine.
///
/// [`dispose`]: GestureInterpreter::dispose
#[derive(Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    viewport: Vec2,

    /// Active contacts in arrival order.
    contacts: Vec<Contact>,
    mode: Mode,

    transform: Transform,

    /// Scale the object is relaxing toward after a pinch.
    settle_target: Option<f32>,
    /// Deadline after which wheel zoom snaps back.
    wheel_revert_at: Option<Duration>,
    /// Completion time of the last plain tap (pending double-tap partner).
    last_tap_at: Option<Duration>,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub fn with_defaults() -> Self {
        Self::from_valid(GestureConfig::default())
    }

    fn from_valid(config: GestureConfig) -> Self {
        let transform = Transform {
            scale: config.default_scale,
            rotation: 0.0,
        };
        Self {
            config,
            viewport: Vec2::new(1.0, 1.0),
            contacts: Vec::new(),
            mode: Mode::Idle,
            transform,
            settle_target: None,
            wheel_revert_at: None,
            last_tap_at: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Sets the viewport size (logical px) used for tap normalization.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.viewport = Vec2::new(width, height);
        } else {
            log::trace!("ignoring degenerate viewport {width}x{height}");
        }
    }

    /// Converts a screen position to normalized device coordinates (+Y up).
    pub fn to_ndc(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x / self.viewport.x * 2.0 - 1.0,
            1.0 - pos.y / self.viewport.y * 2.0,
        )
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn phase(&self) -> GesturePhase {
        match self.mode {
            Mode::Idle => GesturePhase::Idle,
            Mode::Dragging(_) => GesturePhase::Dragging,
            Mode::Pinching(_) => GesturePhase::Pinching,
        }
    }

    pub fn active_contacts(&self) -> usize {
        self.contacts.len()
    }

    /// True while scale relaxes toward the default after a pinch.
    pub fn is_settling(&self) -> bool {
        self.settle_target.is_some()
    }

    /// True while a wheel zoom is waiting to snap back.
    pub fn wheel_revert_pending(&self) -> bool {
        self.wheel_revert_at.is_some()
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn handle_pointer(&mut self, frame: &mut GestureFrame, ev: PointerEvent) {
        if !ev.pos.is_finite() {
            log::trace!("dropping pointer event with non-finite position: {ev:?}");
            return;
        }

        match ev.phase {
            PointerPhase::Down => self.contact_down(ev),
            PointerPhase::Move => self.contact_move(frame, ev),
            PointerPhase::Up => self.contact_end(frame, ev, true),
            PointerPhase::Cancel => self.contact_end(frame, ev, false),
        }
    }

    pub fn handle_wheel(&mut self, frame: &mut GestureFrame, ev: WheelEvent) {
        if !ev.delta_y.is_finite() {
            return;
        }
        if matches!(self.mode, Mode::Pinching(_)) {
            log::trace!("wheel ignored during pinch");
            return;
        }

        self.settle_target = None;
        let next = self
            .config
            .clamp_scale(self.transform.scale - ev.delta_y * self.config.wheel_sensitivity);
        self.set_scale(frame, next);
        self.wheel_revert_at = Some(ev.time + self.config.wheel_revert_delay);
    }

    /// Advances timers and smoothing. Call once per rendered frame.
    pub fn tick(&mut self, frame: &mut GestureFrame, now: Duration) {
        if let Some(at) = self.wheel_revert_at {
            if now >= at {
                self.wheel_revert_at = None;
                log::trace!("wheel zoom reverting to default");
                let default = self.config.default_scale;
                self.set_scale(frame, default);
            }
        }

        if let Some(target) = self.settle_target {
            let scale = self.transform.scale;
            let mut next = scale + (target - scale) * self.config.scale_smoothing_factor;
            if (target - next).abs() <= self.config.settle_epsilon {
                next = target;
                self.settle_target = None;
            }
            let next = self.config.clamp_scale(next);
            self.set_scale(frame, next);
        }
    }

    /// Turns the object by `auto_rotate_speed * dt` while no contact is down.
    pub fn spin(&mut self, frame: &mut GestureFrame, dt: Duration) {
        let speed = self.config.auto_rotate_speed;
        if speed == 0.0 || !self.contacts.is_empty() {
            return;
        }
        let delta = speed * dt.as_secs_f32();
        if delta != 0.0 {
            self.transform.rotation += delta;
            frame.push(GestureSignal::Rotate { delta });
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Restores the default transform and forgets in-flight gestures.
    pub fn reset(&mut self, frame: &mut GestureFrame) {
        self.contacts.clear();
        self.mode = Mode::Idle;
        self.last_tap_at = None;
        self.apply_reset(frame);
    }

    /// Drops every active contact without producing taps (focus loss, view hidden).
    pub fn cancel_all(&mut self) {
        if matches!(self.mode, Mode::Pinching(_)) {
            self.settle_target = Some(self.config.default_scale);
        }
        self.contacts.clear();
        self.mode = Mode::Idle;
    }

    /// Clears all state without emitting anything. The instance is reusable afterwards.
    pub fn dispose(&mut self) {
        self.contacts.clear();
        self.mode = Mode::Idle;
        self.settle_target = None;
        self.wheel_revert_at = None;
        self.last_tap_at = None;
        self.transform = Transform {
            scale: self.config.default_scale,
            rotation: 0.0,
        };
    }

    // ── state machine ─────────────────────────────────────────────────────

    fn contact_down(&mut self, ev: PointerEvent) {
        if self.contact_index(ev.id).is_some() {
            log::trace!("duplicate down for {:?}", ev.id);
            return;
        }

        self.contacts.push(Contact { id: ev.id, pos: ev.pos });

        // A new gesture interrupts any pending relaxation.
        self.settle_target = None;
        self.wheel_revert_at = None;

        match self.mode {
            Mode::Idle => {
                if self.contacts.len() >= 2 {
                    self.begin_pinch();
                } else {
                    self.mode = Mode::Dragging(Drag {
                        id: ev.id,
                        start: ev.pos,
                        last_x: ev.pos.x,
                        latched: false,
                        tap_eligible: true,
                    });
                    log::debug!("gesture: idle -> dragging ({:?})", ev.id);
                }
            }
            Mode::Dragging(_) => {
                // Second finger: the drag is abandoned and never becomes a tap.
                self.begin_pinch();
            }
            Mode::Pinching(_) => {
                log::trace!("extra contact {:?} ignored by pinch", ev.id);
            }
        }
    }

    fn contact_move(&mut self, frame: &mut GestureFrame, ev: PointerEvent) {
        let Some(idx) = self.contact_index(ev.id) else {
            log::trace!("move for unknown contact {:?}", ev.id);
            return;
        };
        self.contacts[idx].pos = ev.pos;

        match self.mode {
            Mode::Dragging(mut drag) if drag.id == ev.id => {
                if !drag.latched
                    && (ev.pos.x - drag.start.x).abs() > self.config.tap_movement_threshold
                {
                    drag.latched = true;
                }

                if drag.latched {
                    let dx = ev.pos.x - drag.last_x;
                    if dx != 0.0 {
                        let delta = dx * self.config.rotation_sensitivity;
                        self.transform.rotation += delta;
                        frame.push(GestureSignal::Rotate { delta });
                        drag.last_x = ev.pos.x;
                    }
                }

                self.mode = Mode::Dragging(drag);
            }

            Mode::Pinching(mut pinch) if ev.id == pinch.a || ev.id == pinch.b => {
                let Some(distance) = self.pair_distance(pinch.a, pinch.b) else {
                    return;
                };

                if pinch.initial_distance < MIN_PINCH_DISTANCE {
                    pinch.initial_distance = distance;
                    pinch.baseline_scale = self.transform.scale;
                    self.mode = Mode::Pinching(pinch);
                    return;
                }

                let next = self
                    .config
                    .clamp_scale(pinch.baseline_scale * distance / pinch.initial_distance);
                self.set_scale(frame, next);
            }

            _ => {}
        }
    }

    fn contact_end(&mut self, frame: &mut GestureFrame, ev: PointerEvent, completed: bool) {
        let Some(idx) = self.contact_index(ev.id) else {
            log::trace!("release for unknown contact {:?}", ev.id);
            return;
        };
        self.contacts.remove(idx);

        match self.mode {
            Mode::Dragging(drag) if drag.id == ev.id => {
                self.mode = Mode::Idle;
                log::debug!("gesture: dragging -> idle ({:?})", ev.id);
                let moved = drag.latched
                    || (ev.pos.x - drag.start.x).abs() > self.config.tap_movement_threshold;
                if completed && drag.tap_eligible && !moved {
                    self.complete_tap(frame, ev.pos, ev.time);
                }
            }

            Mode::Pinching(pinch) if ev.id == pinch.a || ev.id == pinch.b => {
                if self.contacts.len() >= 2 {
                    self.begin_pinch();
                    return;
                }

                self.settle_target = Some(self.config.default_scale);

                if let Some(rest) = self.contacts.first().copied() {
                    self.mode = Mode::Dragging(Drag {
                        id: rest.id,
                        start: rest.pos,
                        last_x: rest.pos.x,
                        latched: true,
                        tap_eligible: false,
                    });
                    log::debug!("gesture: pinching -> dragging ({:?})", rest.id);
                } else {
                    self.mode = Mode::Idle;
                    log::debug!("gesture: pinching -> idle");
                }
            }

            _ => {}
        }
    }

    fn begin_pinch(&mut self) {
        let (a, b) = (self.contacts[0], self.contacts[1]);
        self.mode = Mode::Pinching(Pinch {
            a: a.id,
            b: b.id,
            initial_distance: a.pos.distance(b.pos),
            baseline_scale: self.transform.scale,
        });
        log::debug!("gesture: -> pinching ({:?}, {:?})", a.id, b.id);
    }

    fn complete_tap(&mut self, frame: &mut GestureFrame, pos: Vec2, time: Duration) {
        let is_double = self
            .last_tap_at
            .is_some_and(|prev| time >= prev && time - prev <= self.config.double_tap_window);

        if is_double {
            self.last_tap_at = None;
            log::debug!("gesture: double tap -> reset");
            self.apply_reset(frame);
        } else {
            self.last_tap_at = Some(time);
            frame.push(GestureSignal::Tap {
                ndc: self.to_ndc(pos),
                screen: pos,
            });
        }
    }

    fn apply_reset(&mut self, frame: &mut GestureFrame) {
        self.transform = Transform {
            scale: self.config.default_scale,
            rotation: 0.0,
        };
        self.settle_target = None;
        self.wheel_revert_at = None;
        frame.push(GestureSignal::Reset);
    }

    fn set_scale(&mut self, frame: &mut GestureFrame, scale: f32) {
        if scale != self.transform.scale {
            self.transform.scale = scale;
            frame.push(GestureSignal::ScaleChanged { scale });
        }
    }

    fn contact_index(&self, id: PointerId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    fn pair_distance(&self, a: PointerId, b: PointerId) -> Option<f32> {
        let pa = self.contacts[self.contact_index(a)?].pos;
        let pb = self.contacts[self.contact_index(b)?].pos;
        Some(pa.distance(pb))
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerPhase::{Cancel, Down, Move, Up};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn touch(id: u64, phase: PointerPhase, x: f32, y: f32, t: u64) -> PointerEvent {
        PointerEvent::touch(id, phase, x, y, ms(t))
    }

    fn interp() -> (GestureInterpreter, GestureFrame) {
        let mut g = GestureInterpreter::with_defaults();
        g.set_viewport(400.0, 200.0);
        (g, GestureFrame::new())
    }

    fn taps(frame: &GestureFrame) -> usize {
        frame.taps().count()
    }

    fn rotations(frame: &GestureFrame) -> usize {
        frame
            .signals
            .iter()
            .filter(|s| matches!(s, GestureSignal::Rotate { .. }))
            .count()
    }

    fn resets(frame: &GestureFrame) -> usize {
        frame.signals.iter().filter(|s| **s == GestureSignal::Reset).count()
    }

    // ── taps ──────────────────────────────────────────────────────────────

    #[test]
    fn stationary_press_is_a_tap_with_ndc() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 300.0, 50.0, 0));
        g.handle_pointer(&mut f, touch(1, Up, 300.0, 50.0, 80));

        assert_eq!(
            f.signals,
            vec![GestureSignal::Tap {
                ndc: Vec2::new(0.5, 0.5),
                screen: Vec2::new(300.0, 50.0),
            }]
        );
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn jitter_below_threshold_is_one_tap_and_no_rotation() {
        for wiggle in [0.0f32, 1.5, -4.0, 9.9, -10.0] {
            let (mut g, mut f) = interp();
            g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
            g.handle_pointer(&mut f, touch(1, Move, 100.0 + wiggle, 104.0, 16));
            g.handle_pointer(&mut f, touch(1, Move, 100.0 - wiggle / 2.0, 96.0, 32));
            g.handle_pointer(&mut f, touch(1, Up, 100.0 + wiggle, 100.0, 48));

            assert_eq!(taps(&f), 1, "wiggle {wiggle}");
            assert_eq!(rotations(&f), 0, "wiggle {wiggle}");
            assert_eq!(g.transform().rotation, 0.0);
        }
    }

    #[test]
    fn mouse_click_uses_the_same_tap_rules() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, PointerEvent::mouse(Down, 200.0, 100.0, ms(0)));
        g.handle_pointer(&mut f, PointerEvent::mouse(Move, 203.0, 100.0, ms(10)));
        g.handle_pointer(&mut f, PointerEvent::mouse(Up, 203.0, 100.0, ms(20)));
        assert_eq!(taps(&f), 1);
    }

    #[test]
    fn hover_moves_without_press_are_ignored() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, PointerEvent::mouse(Move, 10.0, 10.0, ms(0)));
        g.handle_pointer(&mut f, PointerEvent::mouse(Move, 90.0, 10.0, ms(16)));
        assert!(f.is_empty());
        assert_eq!(g.active_contacts(), 0);
    }

    // ── drag / rotation ───────────────────────────────────────────────────

    #[test]
    fn drag_thirty_pixels_rotates_point_three_radians() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(1, Move, 130.0, 100.0, 16));
        g.handle_pointer(&mut f, touch(1, Up, 130.0, 100.0, 32));

        assert_eq!(taps(&f), 0);
        assert!((f.total_rotation() - 0.3).abs() < 1e-5);
        assert!((g.transform().rotation - 0.3).abs() < 1e-5);
    }

    #[test]
    fn rotation_accumulates_per_sample() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(1, Move, 120.0, 0.0, 16));
        g.handle_pointer(&mut f, touch(1, Move, 140.0, 0.0, 32));
        g.handle_pointer(&mut f, touch(1, Move, 130.0, 0.0, 48));

        let deltas: Vec<f32> = f
            .signals
            .iter()
            .filter_map(|s| match s {
                GestureSignal::Rotate { delta } => Some(*delta),
                _ => None,
            })
            .collect();
        assert_eq!(deltas.len(), 3);
        assert!((deltas[0] - 0.2).abs() < 1e-5);
        assert!((deltas[1] - 0.2).abs() < 1e-5);
        assert!((deltas[2] + 0.1).abs() < 1e-5);
        assert!((g.transform().rotation - 0.3).abs() < 1e-5);
    }

    #[test]
    fn drag_returning_to_start_is_still_not_a_tap() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(1, Move, 150.0, 0.0, 16));
        g.handle_pointer(&mut f, touch(1, Move, 100.0, 0.0, 32));
        g.handle_pointer(&mut f, touch(1, Up, 100.0, 0.0, 48));

        assert_eq!(taps(&f), 0);
        assert!(g.transform().rotation.abs() < 1e-6);
    }

    #[test]
    fn cancel_never_taps() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(1, Cancel, 100.0, 0.0, 30));
        assert!(f.is_empty());
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    // ── pinch ─────────────────────────────────────────────────────────────

    #[test]
    fn pinch_doubling_distance_doubles_scale() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 150.0, 100.0, 0));
        assert_eq!(g.phase(), GesturePhase::Pinching);

        g.handle_pointer(&mut f, touch(2, Move, 200.0, 100.0, 16));
        assert_eq!(g.transform().scale, 1.0);
        assert_eq!(f.signals, vec![GestureSignal::ScaleChanged { scale: 1.0 }]);
    }

    #[test]
    fn pinch_scale_stays_clamped() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 0.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 20.0, 0.0, 0));

        for x in [2000.0f32, 1.0, 400.0, 1.5, 40.0, 10_000.0, 2.0] {
            g.handle_pointer(&mut f, touch(2, Move, x, 0.0, 16));
            let s = g.transform().scale;
            assert!((0.1..=2.0).contains(&s), "scale {s} escaped for x={x}");
        }
        for s in &f.signals {
            if let GestureSignal::ScaleChanged { scale } = s {
                assert!((0.1..=2.0).contains(scale));
            }
        }
    }

    #[test]
    fn pinch_suppresses_rotation() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 200.0, 100.0, 5));
        g.handle_pointer(&mut f, touch(1, Move, 40.0, 100.0, 16));
        g.handle_pointer(&mut f, touch(2, Move, 260.0, 100.0, 16));

        assert_eq!(rotations(&f), 0);
        assert_eq!(g.transform().rotation, 0.0);
    }

    #[test]
    fn second_finger_abandons_pending_tap() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 160.0, 100.0, 10));
        g.handle_pointer(&mut f, touch(2, Up, 160.0, 100.0, 40));
        g.handle_pointer(&mut f, touch(1, Up, 100.0, 100.0, 50));
        assert_eq!(taps(&f), 0);
    }

    #[test]
    fn pinch_degrading_to_one_finger_drags_without_tap() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 150.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Up, 150.0, 100.0, 50));
        assert_eq!(g.phase(), GesturePhase::Dragging);

        g.handle_pointer(&mut f, touch(1, Move, 120.0, 100.0, 60));
        g.handle_pointer(&mut f, touch(1, Up, 120.0, 100.0, 70));

        assert_eq!(taps(&f), 0);
        assert!((f.total_rotation() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn pinch_remnant_released_in_place_is_not_a_tap() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 150.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(1, Up, 100.0, 100.0, 50));
        g.handle_pointer(&mut f, touch(2, Up, 150.0, 100.0, 60));
        assert_eq!(taps(&f), 0);
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn third_contact_reseeds_pinch_when_one_of_pair_lifts() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 0.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 50.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(3, Down, 0.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(1, Up, 0.0, 0.0, 10));
        assert_eq!(g.phase(), GesturePhase::Pinching);

        // Pair is now (2, 3); the new baseline distance is |(50,0)-(0,100)|.
        let base = Vec2::new(50.0, 0.0).distance(Vec2::new(0.0, 100.0));
        g.handle_pointer(&mut f, touch(3, Move, 50.0, 0.0 + base * 2.0, 20));
        assert!((g.transform().scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn coincident_pinch_waits_for_separation() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 10.0, 10.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 10.0, 10.0, 0));
        g.handle_pointer(&mut f, touch(2, Move, 30.0, 10.0, 16));
        assert_eq!(g.transform().scale, 0.5);

        g.handle_pointer(&mut f, touch(2, Move, 50.0, 10.0, 32));
        assert_eq!(g.transform().scale, 1.0);
    }

    // ── settling ──────────────────────────────────────────────────────────

    #[test]
    fn scale_settles_back_after_pinch_without_overshoot() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 150.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Move, 200.0, 100.0, 16));
        g.handle_pointer(&mut f, touch(1, Up, 100.0, 100.0, 32));
        g.handle_pointer(&mut f, touch(2, Up, 200.0, 100.0, 32));
        assert!(g.is_settling());

        let mut prev = g.transform().scale;
        let mut steps = 0;
        while g.is_settling() {
            g.tick(&mut f, ms(32 + steps * 16));
            let s = g.transform().scale;
            assert!(s <= prev, "settling must approach monotonically");
            assert!(s >= 0.5, "settling overshot the default");
            prev = s;
            steps += 1;
            assert!(steps < 200, "settling did not converge");
        }
        assert_eq!(g.transform().scale, 0.5);
    }

    #[test]
    fn first_settle_step_follows_the_smoothing_factor() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 150.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Move, 200.0, 100.0, 16));
        g.handle_pointer(&mut f, touch(2, Up, 200.0, 100.0, 32));
        g.handle_pointer(&mut f, touch(1, Up, 100.0, 100.0, 32));

        g.tick(&mut f, ms(48));
        // 1.0 + (0.5 - 1.0) * 0.1
        assert!((g.transform().scale - 0.95).abs() < 1e-6);
    }

    #[test]
    fn new_gesture_interrupts_settling() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 150.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(2, Move, 200.0, 100.0, 16));
        g.handle_pointer(&mut f, touch(2, Up, 200.0, 100.0, 32));
        g.handle_pointer(&mut f, touch(1, Up, 100.0, 100.0, 32));
        g.tick(&mut f, ms(48));

        g.handle_pointer(&mut f, touch(3, Down, 10.0, 10.0, 64));
        assert!(!g.is_settling());
        let held = g.transform().scale;
        g.tick(&mut f, ms(80));
        assert_eq!(g.transform().scale, held);
    }

    // ── double tap ────────────────────────────────────────────────────────

    #[test]
    fn double_tap_within_window_resets_transform() {
        let (mut g, mut f) = interp();
        // Rotate and zoom first so the reset is observable.
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(1, Move, 150.0, 100.0, 10));
        g.handle_pointer(&mut f, touch(1, Up, 150.0, 100.0, 20));
        g.handle_wheel(&mut f, WheelEvent { delta_y: -300.0, time: ms(30) });
        assert_ne!(g.transform(), Transform { scale: 0.5, rotation: 0.0 });
        f.clear();

        g.handle_pointer(&mut f, touch(1, Down, 200.0, 100.0, 1000));
        g.handle_pointer(&mut f, touch(1, Up, 200.0, 100.0, 1050));
        g.handle_pointer(&mut f, touch(1, Down, 200.0, 100.0, 1200));
        g.handle_pointer(&mut f, touch(1, Up, 200.0, 100.0, 1250));

        assert_eq!(taps(&f), 1);
        assert_eq!(resets(&f), 1);
        assert_eq!(f.signals.last(), Some(&GestureSignal::Reset));
        assert_eq!(g.transform(), Transform { scale: 0.5, rotation: 0.0 });
        assert!(!g.wheel_revert_pending());
    }

    #[test]
    fn taps_outside_window_stay_independent() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 200.0, 100.0, 0));
        g.handle_pointer(&mut f, touch(1, Up, 200.0, 100.0, 50));
        g.handle_pointer(&mut f, touch(1, Down, 200.0, 100.0, 500));
        g.handle_pointer(&mut f, touch(1, Up, 200.0, 100.0, 550));

        assert_eq!(taps(&f), 2);
        assert_eq!(resets(&f), 0);
    }

    #[test]
    fn third_quick_tap_starts_a_new_pair() {
        let (mut g, mut f) = interp();
        for (i, t) in [0u64, 150, 300].into_iter().enumerate() {
            let id = i as u64 + 1;
            g.handle_pointer(&mut f, touch(id, Down, 10.0, 10.0, t));
            g.handle_pointer(&mut f, touch(id, Up, 10.0, 10.0, t + 20));
        }
        assert_eq!(taps(&f), 2);
        assert_eq!(resets(&f), 1);
    }

    #[test]
    fn a_drag_between_taps_does_not_count_as_a_tap() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 10.0, 10.0, 0));
        g.handle_pointer(&mut f, touch(1, Up, 10.0, 10.0, 20));
        g.handle_pointer(&mut f, touch(1, Down, 10.0, 10.0, 100));
        g.handle_pointer(&mut f, touch(1, Move, 80.0, 10.0, 120));
        g.handle_pointer(&mut f, touch(1, Up, 80.0, 10.0, 140));
        assert_eq!(resets(&f), 0);
        assert_eq!(taps(&f), 1);
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_zooms_clamped_then_snaps_back() {
        let (mut g, mut f) = interp();
        g.handle_wheel(&mut f, WheelEvent { delta_y: -100.0, time: ms(0) });
        assert!((g.transform().scale - 0.6).abs() < 1e-6);

        g.handle_wheel(&mut f, WheelEvent { delta_y: -1e6, time: ms(100) });
        assert_eq!(g.transform().scale, 2.0);

        g.tick(&mut f, ms(599));
        assert_eq!(g.transform().scale, 2.0);
        g.tick(&mut f, ms(600));
        assert_eq!(g.transform().scale, 0.5);
        assert_eq!(f.signals.last(), Some(&GestureSignal::ScaleChanged { scale: 0.5 }));
    }

    #[test]
    fn touch_interrupts_wheel_revert() {
        let (mut g, mut f) = interp();
        g.handle_wheel(&mut f, WheelEvent { delta_y: 200.0, time: ms(0) });
        assert!((g.transform().scale - 0.3).abs() < 1e-6);

        g.handle_pointer(&mut f, touch(1, Down, 10.0, 10.0, 100));
        g.tick(&mut f, ms(1000));
        assert!((g.transform().scale - 0.3).abs() < 1e-6);
    }

    // ── idle spin ─────────────────────────────────────────────────────────

    fn spinning() -> (GestureInterpreter, GestureFrame) {
        let cfg = GestureConfig::default().auto_rotate_speed(0.3);
        let mut g = GestureInterpreter::new(cfg).unwrap();
        g.set_viewport(400.0, 200.0);
        (g, GestureFrame::new())
    }

    #[test]
    fn idle_spin_turns_the_object() {
        let (mut g, mut f) = spinning();
        g.spin(&mut f, ms(500));
        assert!((g.transform().rotation - 0.15).abs() < 1e-6);
        assert_eq!(rotations(&f), 1);
    }

    #[test]
    fn spin_pauses_while_dragging_or_pinching() {
        let (mut g, mut f) = spinning();
        g.handle_pointer(&mut f, touch(1, Down, 100.0, 100.0, 0));
        g.spin(&mut f, ms(500));
        assert_eq!(g.transform().rotation, 0.0);

        g.handle_pointer(&mut f, touch(2, Down, 200.0, 100.0, 10));
        assert_eq!(g.phase(), GesturePhase::Pinching);
        g.spin(&mut f, ms(500));
        assert_eq!(g.transform().rotation, 0.0);
        assert!(f.signals.iter().all(|s| !matches!(s, GestureSignal::Rotate { .. })));

        g.handle_pointer(&mut f, touch(1, Up, 100.0, 100.0, 40));
        g.handle_pointer(&mut f, touch(2, Up, 200.0, 100.0, 50));
        g.spin(&mut f, ms(100));
        assert!((g.transform().rotation - 0.03).abs() < 1e-6);
    }

    #[test]
    fn spin_is_off_by_default() {
        let (mut g, mut f) = interp();
        g.spin(&mut f, ms(1000));
        assert!(f.is_empty());
        assert_eq!(g.transform().rotation, 0.0);
    }

    // ── malformed input / lifecycle ───────────────────────────────────────

    #[test]
    fn unmatched_release_and_move_are_ignored() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(7, Up, 10.0, 10.0, 0));
        g.handle_pointer(&mut f, touch(7, Move, 90.0, 10.0, 0));
        g.handle_pointer(&mut f, touch(7, Cancel, 90.0, 10.0, 0));
        assert!(f.is_empty());
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, f32::NAN, 0.0, 0));
        assert_eq!(g.active_contacts(), 0);
    }

    #[test]
    fn reset_emits_signal_and_clears_contacts() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 10.0, 10.0, 0));
        g.handle_pointer(&mut f, touch(1, Move, 60.0, 10.0, 16));
        g.reset(&mut f);

        assert_eq!(g.active_contacts(), 0);
        assert_eq!(g.transform(), Transform { scale: 0.5, rotation: 0.0 });
        assert_eq!(f.signals.last(), Some(&GestureSignal::Reset));
    }

    #[test]
    fn cancel_all_mid_pinch_settles() {
        let (mut g, mut f) = interp();
        g.handle_pointer(&mut f, touch(1, Down, 0.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(2, Down, 50.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(2, Move, 100.0, 0.0, 16));
        g.cancel_all();

        assert_eq!(g.phase(), GesturePhase::Idle);
        assert!(g.is_settling());
    }

    #[test]
    fn dispose_is_silent_and_reusable() {
        let (mut g, mut f) = interp();
        g.handle_wheel(&mut f, WheelEvent { delta_y: -100.0, time: ms(0) });
        f.clear();
        g.dispose();

        assert!(f.is_empty());
        assert!(!g.wheel_revert_pending());
        assert_eq!(g.transform().scale, 0.5);

        g.handle_pointer(&mut f, touch(1, Down, 10.0, 10.0, 10));
        g.handle_pointer(&mut f, touch(1, Up, 10.0, 10.0, 20));
        assert_eq!(taps(&f), 1);
    }

    #[test]
    fn with_defaults_matches_new_with_default_config() {
        let a = GestureInterpreter::with_defaults();
        let b = GestureInterpreter::new(GestureConfig::default()).unwrap();
        assert_eq!(a.config(), b.config());
        assert_eq!(a.transform(), b.transform());
        assert_eq!(a.phase(), b.phase());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GestureConfig::default().scale_range(1.0, 0.5);
        assert!(GestureInterpreter::new(cfg).is_err());
    }

    #[test]
    fn custom_sensitivity_applies() {
        let cfg = GestureConfig::default().rotation_sensitivity(0.02);
        let mut g = GestureInterpreter::new(cfg).unwrap();
        let mut f = GestureFrame::new();
        g.handle_pointer(&mut f, touch(1, Down, 0.0, 0.0, 0));
        g.handle_pointer(&mut f, touch(1, Move, 50.0, 0.0, 16));
        assert!((g.transform().rotation - 1.0).abs() < 1e-5);
    }
}

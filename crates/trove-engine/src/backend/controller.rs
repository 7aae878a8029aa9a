use std::time::Duration;

use trove_gesture::{
    ConfigError, GestureConfig, GestureFrame, GestureHandler, GestureInterpreter, PointerEvent,
    Transform, WheelEvent,
};

use crate::capture::{CameraSource, CameraStream, ViewMode};
use crate::coords::Vec2;
use crate::game::{FindOutcome, GameEvent, GamePhase, GameRules, GameSession};
use crate::scene::HitResult;

use super::{Backend, Message};

/// Drives one treasure hunt: routes input through the gesture interpreter,
/// scores hits, runs the countdown and keeps the backend in sync.
///
/// The controller exclusively owns its interpreter, session and camera
/// stream; the backend is only reached through [`Backend`].
pub struct HuntController<B: Backend> {
    gestures: GestureInterpreter,
    session: GameSession,
    backend: B,
    frame: GestureFrame,
    camera: Option<CameraStream>,
    mode: ViewMode,
    /// `now` of the previous frame; the countdown follows this timeline.
    last_frame_at: Option<Duration>,
}

impl<B: Backend> HuntController<B> {
    pub fn new(backend: B, gestures: GestureConfig, rules: GameRules) -> Result<Self, ConfigError> {
        let gestures = GestureInterpreter::new(gestures)?;
        let mut this = Self {
            gestures,
            session: GameSession::new(rules),
            backend,
            frame: GestureFrame::new(),
            camera: None,
            mode: ViewMode::Viewer,
            last_frame_at: None,
        };
        let initial = this.gestures.transform();
        this.backend.render_transform(initial);
        Ok(this)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }

    pub fn transform(&self) -> Transform {
        self.gestures.transform()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn status_line(&self) -> String {
        self.session.status_line()
    }

    /// Viewport size in logical pixels, used to normalize taps.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.gestures.set_viewport(width, height);
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn pointer(&mut self, ev: PointerEvent) {
        self.gestures.handle_pointer(&mut self.frame, ev);
        self.drain();
    }

    pub fn wheel(&mut self, ev: WheelEvent) {
        self.gestures.handle_wheel(&mut self.frame, ev);
        self.drain();
    }

    /// Drops in-flight contacts without producing taps (focus loss).
    pub fn cancel_contacts(&mut self) {
        self.gestures.cancel_all();
    }

    /// Per-frame update. `now` is the input clock, `dt` the frame delta.
    pub fn frame(&mut self, now: Duration, dt: Duration) {
        self.gestures.spin(&mut self.frame, dt);
        self.gestures.tick(&mut self.frame, now);
        self.drain();

        // `dt` may be clamped for animation; the countdown uses real elapsed time.
        let elapsed = match self.last_frame_at {
            Some(last) => now.saturating_sub(last),
            None => dt,
        };
        self.last_frame_at = Some(now);

        match self.session.tick(elapsed) {
            Some(GameEvent::TimeUp) => {
                if let Some(text) = self.session.outcome_message() {
                    self.backend.show_message(Message::error(text));
                }
            }
            Some(GameEvent::Second { time_left }) => {
                log::trace!("{time_left}s left");
            }
            None => {}
        }
    }

    fn drain(&mut self) {
        if self.frame.is_empty() {
            return;
        }

        let mut sink = SignalSink {
            backend: &mut self.backend,
            session: &mut self.session,
            transform_changed: false,
        };
        self.frame.dispatch(&mut sink);
        let changed = sink.transform_changed;
        self.frame.clear();

        if changed {
            let t = self.gestures.transform();
            self.backend.render_transform(t);
        }
    }

    // ── round lifecycle ───────────────────────────────────────────────────

    /// Starts a round unless one is running. Returns whether a round began.
    pub fn start(&mut self) -> bool {
        if !self.session.start() {
            return false;
        }
        self.announce_round();
        true
    }

    /// Abandons the current round and starts over with the default view.
    pub fn restart(&mut self) {
        self.session.restart();
        self.gestures.reset(&mut self.frame);
        self.drain();
        self.announce_round();
    }

    fn announce_round(&mut self) {
        self.backend.reset_targets();
        let rules = self.session.rules();
        self.backend.show_message(Message::info(format!(
            "Find all {} treasures in {}s!",
            rules.total_targets, rules.time_limit_secs
        )));
        if let Some(text) = self.session.outcome_message() {
            self.backend.show_message(Message::success(text));
        }
    }

    // ── camera ────────────────────────────────────────────────────────────

    /// Tries to switch to AR. On failure the error is shown and the viewer stays active.
    pub fn enter_ar(&mut self, source: &mut dyn CameraSource) -> ViewMode {
        if self.mode == ViewMode::Ar {
            return self.mode;
        }

        match source.acquire() {
            Ok(stream) => {
                log::info!("camera acquired ({} tracks)", stream.track_count());
                self.camera = Some(stream);
                self.mode = ViewMode::Ar;
            }
            Err(err) => {
                log::warn!("AR unavailable: {err}");
                self.backend
                    .show_message(Message::error(format!("Unable to start AR: {err}")));
                self.mode = ViewMode::Viewer;
            }
        }
        self.mode
    }

    /// Releases the camera and returns to the plain viewer.
    pub fn leave_ar(&mut self) {
        if let Some(mut stream) = self.camera.take() {
            stream.stop();
        }
        self.mode = ViewMode::Viewer;
    }

    /// Releases the camera and clears every gesture timer and contact.
    pub fn dispose(&mut self) {
        self.leave_ar();
        self.gestures.dispose();
        self.frame.clear();
        log::debug!("hunt controller disposed");
    }
}

/// Applies one frame's gesture signals to the session and backend.
struct SignalSink<'a, B: Backend> {
    backend: &'a mut B,
    session: &'a mut GameSession,
    transform_changed: bool,
}

impl<B: Backend> GestureHandler for SignalSink<'_, B> {
    fn on_tap(&mut self, ndc: Vec2, screen: Vec2) {
        let HitResult::Hit { id, .. } = self.backend.raycast(ndc) else {
            log::trace!("tap at ({:.0}, {:.0}) missed", screen.x, screen.y);
            return;
        };

        match self.session.register_find() {
            FindOutcome::Ignored => {
                log::debug!("hit on {id:?} ignored in {:?}", self.session.phase());
            }
            FindOutcome::Counted { found } => {
                self.backend.mark_found(id);
                let total = self.session.rules().total_targets;
                self.backend
                    .show_message(Message::success(format!("Found one! {found}/{total}")));
            }
            FindOutcome::Won => {
                self.backend.mark_found(id);
                debug_assert_eq!(self.session.phase(), GamePhase::Won);
                if let Some(text) = self.session.outcome_message() {
                    self.backend.show_message(Message::success(text));
                }
            }
        }
    }

    fn on_rotate(&mut self, _delta: f32) {
        self.transform_changed = true;
    }

    fn on_scale_change(&mut self, _scale: f32) {
        self.transform_changed = true;
    }

    fn on_reset(&mut self) {
        self.transform_changed = true;
    }
}

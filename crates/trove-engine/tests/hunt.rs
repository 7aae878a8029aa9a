//! Whole-round scenarios driven through `HuntController` with a headless backend.

use std::time::Duration;

use trove_engine::assets::ModelAsset;
use trove_engine::backend::{HeadlessBackend, HuntController, MessageKind};
use trove_engine::capture::{NoCamera, ViewMode};
use trove_engine::coords::{Vec2, Viewport};
use trove_engine::game::{GamePhase, GameRules};
use trove_engine::gesture::{GestureConfig, PointerEvent, PointerPhase};
use trove_engine::scene::Scene;

const VIEW: Viewport = Viewport::new(1280.0, 720.0);
const FRAME: Duration = Duration::from_millis(100);

/// Controller plus a simulated clock.
struct Session {
    hunt: HuntController<HeadlessBackend>,
    now: Duration,
}

impl Session {
    fn new(rules: GameRules) -> Self {
        let scene = Scene::treasure_ring(
            &ModelAsset::placeholder(),
            rules.total_targets as usize,
            VIEW.aspect(),
        );
        let mut hunt =
            HuntController::new(HeadlessBackend::new(scene), GestureConfig::default(), rules)
                .expect("default gesture config is valid");
        hunt.set_viewport(VIEW.width, VIEW.height);
        Self { hunt, now: Duration::ZERO }
    }

    fn advance(&mut self, total: Duration) {
        let end = self.now + total;
        while self.now < end {
            self.now += FRAME;
            self.hunt.frame(self.now, FRAME);
        }
    }

    fn pointer(&mut self, ev: PointerEvent) {
        self.hunt.pointer(ev);
    }

    fn tap(&mut self, pos: Vec2) {
        let t = self.now;
        self.pointer(PointerEvent::touch(1, PointerPhase::Down, pos.x, pos.y, t));
        self.pointer(PointerEvent::touch(1, PointerPhase::Up, pos.x, pos.y, t + Duration::from_millis(60)));
        // Keep consecutive taps outside the double-tap window.
        self.advance(Duration::from_millis(500));
    }

    fn drag(&mut self, from: Vec2, dx: f32) {
        let t = self.now;
        self.pointer(PointerEvent::mouse(PointerPhase::Down, from.x, from.y, t));
        for step in 1..=4 {
            let x = from.x + dx * step as f32 / 4.0;
            self.pointer(PointerEvent::mouse(PointerPhase::Move, x, from.y, t + Duration::from_millis(16 * step)));
        }
        self.pointer(PointerEvent::mouse(PointerPhase::Up, from.x + dx, from.y, t + Duration::from_millis(80)));
        self.advance(Duration::from_millis(100));
    }

    /// Taps the screen position of a still-visible target.
    fn tap_next_target(&mut self) -> bool {
        let scene = self.hunt.backend().scene();
        let Some(pos) = scene
            .objects()
            .iter()
            .filter(|o| o.visible)
            .find_map(|o| scene.screen_position(o.id, VIEW))
        else {
            return false;
        };
        self.tap(pos);
        true
    }
}

#[test]
fn finding_every_target_wins_the_round() {
    let mut s = Session::new(GameRules::default());
    assert!(s.hunt.start());
    assert_eq!(
        s.hunt.backend().last_message().map(|m| m.text.as_str()),
        Some("Find all 4 treasures in 30s!")
    );

    s.drag(Vec2::new(300.0, 600.0), 60.0);
    assert!((s.hunt.backend().scene().transform().rotation - 0.6).abs() < 1e-4);

    let mut taps = 0;
    while s.hunt.session().phase() == GamePhase::Playing && taps < 16 {
        assert!(s.tap_next_target(), "no visible target left while still playing");
        taps += 1;
    }

    assert_eq!(s.hunt.session().phase(), GamePhase::Won);
    assert_eq!(s.hunt.session().found(), 4);
    assert_eq!(s.hunt.backend().found().len(), 4);
    assert_eq!(s.hunt.backend().scene().visible_count(), 0);
    assert_eq!(s.hunt.backend().last_message().map(|m| m.text.as_str()), Some("You Win!"));
    assert!(s.hunt.status_line().ends_with("Found: 4/4"));
}

#[test]
fn running_out_of_time_loses_and_freezes_score() {
    let mut s = Session::new(GameRules::default().time_limit_secs(3));
    s.hunt.start();
    assert!(s.tap_next_target());
    assert_eq!(s.hunt.session().found(), 1);

    s.advance(Duration::from_secs(3));
    assert_eq!(s.hunt.session().phase(), GamePhase::Lost);
    assert_eq!(s.hunt.session().time_left(), 0);

    let lose: Vec<_> = s.hunt.backend().messages_of(MessageKind::Error).collect();
    assert_eq!(lose.len(), 1);
    assert_eq!(lose[0].text, "Time's Up! You Lose!");

    let visible = s.hunt.backend().scene().visible_count();
    assert!(s.tap_next_target());
    assert_eq!(s.hunt.session().found(), 1);
    assert_eq!(s.hunt.backend().scene().visible_count(), visible);
}

#[test]
fn restart_after_loss_plays_a_fresh_round() {
    let mut s = Session::new(GameRules::default().targets(2).time_limit_secs(2));
    s.hunt.start();
    s.tap_next_target();
    s.advance(Duration::from_secs(2));
    assert_eq!(s.hunt.session().phase(), GamePhase::Lost);

    s.hunt.restart();
    assert_eq!(s.hunt.session().phase(), GamePhase::Playing);
    assert_eq!(s.hunt.session().found(), 0);
    assert_eq!(s.hunt.backend().scene().visible_count(), 2);

    assert!(s.tap_next_target());
    assert!(s.tap_next_target());
    assert_eq!(s.hunt.session().phase(), GamePhase::Won);
}

#[test]
fn pinch_zoom_relaxes_back_to_default() {
    let mut s = Session::new(GameRules::default());
    let t = s.now;
    let ms = Duration::from_millis;

    s.pointer(PointerEvent::touch(1, PointerPhase::Down, 600.0, 360.0, t));
    s.pointer(PointerEvent::touch(2, PointerPhase::Down, 680.0, 360.0, t + ms(10)));
    s.pointer(PointerEvent::touch(2, PointerPhase::Move, 760.0, 360.0, t + ms(30)));
    assert!((s.hunt.backend().scene().transform().scale - 1.0).abs() < 1e-5);

    s.pointer(PointerEvent::touch(2, PointerPhase::Up, 760.0, 360.0, t + ms(40)));
    s.pointer(PointerEvent::touch(1, PointerPhase::Up, 600.0, 360.0, t + ms(50)));
    assert!(s.hunt.gestures().is_settling());

    s.advance(Duration::from_secs(20));
    assert!(!s.hunt.gestures().is_settling());
    assert_eq!(s.hunt.backend().scene().transform().scale, 0.5);
    assert_eq!(s.hunt.session().phase(), GamePhase::Ready);
}

#[test]
fn desktop_without_camera_keeps_playing_in_viewer() {
    let mut s = Session::new(GameRules::default());
    s.hunt.start();
    assert_eq!(s.hunt.enter_ar(&mut NoCamera), ViewMode::Viewer);
    assert_eq!(s.hunt.view_mode(), ViewMode::Viewer);
    assert!(s.tap_next_target());
    assert_eq!(s.hunt.session().found(), 1);

    s.hunt.dispose();
    assert_eq!(s.hunt.gestures().active_contacts(), 0);
}

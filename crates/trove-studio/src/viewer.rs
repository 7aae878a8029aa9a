use std::time::Duration;

use anyhow::{Context, Result};

use trove_engine::assets::ModelAsset;
use trove_engine::backend::HuntController;
use trove_engine::capture::NoCamera;
use trove_engine::coords::{Vec2, Vec3, Viewport};
use trove_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use trove_engine::game::GameRules;
use trove_engine::input::{InputEvent, Key, KeyState};
use trove_engine::paint::Color;
use trove_engine::render::{CircleCmd, CircleRenderer, DrawList};
use trove_engine::scene::Scene;
use trove_gesture::GestureConfig;

use crate::backend::ViewerBackend;

const HUD_MARGIN: f32 = 24.0;
const HUD_PIP_RADIUS: f32 = 8.0;
const HUD_PIP_SPACING: f32 = 22.0;

/// Plain 3D viewer: every target is drawn as a shaded disc at its projected
/// position, with a row of pips for the score.
pub struct Viewer {
    hunt: HuntController<ViewerBackend>,
    renderer: CircleRenderer,
    draw_list: DrawList,
    want_ar: bool,
    started: bool,
    title: String,
}

impl Viewer {
    pub fn new(
        model: &ModelAsset,
        gestures: GestureConfig,
        rules: GameRules,
        want_ar: bool,
    ) -> Result<Self> {
        let scene = Scene::treasure_ring(model, rules.total_targets as usize, 16.0 / 9.0);
        let hunt = HuntController::new(ViewerBackend::new(scene), gestures, rules)
            .context("invalid gesture configuration")?;

        Ok(Self {
            hunt,
            renderer: CircleRenderer::new(),
            draw_list: DrawList::new(),
            want_ar,
            started: false,
            title: String::new(),
        })
    }

    fn begin(&mut self) {
        self.started = true;
        if self.want_ar {
            self.hunt.enter_ar(&mut NoCamera);
        }
        self.hunt.start();
    }

    fn update_title(&mut self, window: &WindowCtx<'_>) {
        let mut title = format!("Trove | {}", self.hunt.status_line());
        if let Some(banner) = self.hunt.backend().banner() {
            title.push_str(" | ");
            title.push_str(&banner.text);
        }
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl App for Viewer {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::Pointer(p) => self.hunt.pointer(*p),
            InputEvent::Wheel(w) => self.hunt.wheel(*w),
            InputEvent::Focused(false) => self.hunt.cancel_contacts(),
            InputEvent::Key { key, state: KeyState::Pressed, repeat: false } => match key {
                Key::Escape => return AppControl::Exit,
                Key::R => self.hunt.restart(),
                Key::Space | Key::Enter => {
                    self.hunt.start();
                }
                Key::A => {
                    self.hunt.enter_ar(&mut NoCamera);
                }
                _ => {}
            },
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if viewport.is_valid() {
            self.hunt.set_viewport(viewport.width, viewport.height);
            self.hunt
                .backend_mut()
                .scene_mut()
                .camera_mut()
                .set_aspect(viewport.aspect());
        }

        if !self.started {
            self.begin();
        }

        self.hunt
            .frame(ctx.time.elapsed, Duration::from_secs_f32(ctx.time.dt));
        self.update_title(&ctx.window);

        self.draw_list.clear();
        let backend = self.hunt.backend();
        paint_scene(
            backend.scene(),
            viewport,
            backend.found_count(),
            self.hunt.session().rules().total_targets,
            &mut self.draw_list,
        );

        let renderer = &mut self.renderer;
        let list = &mut self.draw_list;
        ctx.render(Color::from_srgb_u8(18, 18, 24, 255), |rctx, target| {
            renderer.render(rctx, target, list);
        })
    }

    fn on_exit(&mut self) {
        log::info!("exiting: {}", self.hunt.status_line());
        self.hunt.dispose();
    }
}

/// Records the visible targets, the pivot and the score pips into `list`.
fn paint_scene(scene: &Scene, viewport: Viewport, found: usize, total: u32, list: &mut DrawList) {
    let camera = scene.camera();
    let half_height = viewport.height * 0.5;

    if let Some(p) = camera.project(Vec3::ZERO) {
        list.push(
            CircleCmd::new(viewport.ndc_to_screen(p.ndc), 4.0, Color::from_srgb_u8(90, 90, 110, 255))
                .at_depth(p.depth),
        );
    }

    for obj in scene.objects().iter().filter(|o| o.visible) {
        let Some(p) = camera.project(scene.world_center(obj)) else {
            continue;
        };
        let radius = camera.projected_radius(scene.world_radius(obj), p.depth) * half_height;
        list.push(
            CircleCmd::new(viewport.ndc_to_screen(p.ndc), radius, obj.color)
                .with_border(2.0, obj.color.shade(0.55))
                .at_depth(p.depth),
        );
    }

    let gold = Color::from_srgb_u8(255, 200, 40, 255);
    let empty = Color::from_straight(1.0, 1.0, 1.0, 0.15);
    for i in 0..total as usize {
        let center = Vec2::new(HUD_MARGIN + i as f32 * HUD_PIP_SPACING, HUD_MARGIN);
        let pip = if i < found {
            CircleCmd::new(center, HUD_PIP_RADIUS, gold)
        } else {
            CircleCmd::new(center, HUD_PIP_RADIUS, empty).with_border(1.5, Color::from_straight(1.0, 1.0, 1.0, 0.8))
        };
        list.push(pip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use trove_engine::backend::Backend;

    fn ring() -> ViewerBackend {
        ViewerBackend::new(Scene::treasure_ring(&ModelAsset::placeholder(), 4, 16.0 / 9.0))
    }

    #[test]
    fn paints_targets_pivot_and_pips() {
        let backend = ring();
        let mut list = DrawList::new();
        paint_scene(backend.scene(), Viewport::new(1280.0, 720.0), 0, 4, &mut list);
        assert_eq!(list.len(), 1 + 4 + 4);
        assert!(list.items().iter().all(|c| c.radius > 0.0));
    }

    #[test]
    fn found_targets_disappear_and_fill_pips() {
        let mut backend = ring();
        let first = backend.scene().objects()[0].id;
        backend.mark_found(first);

        let mut list = DrawList::new();
        paint_scene(backend.scene(), Viewport::new(1280.0, 720.0), backend.found_count(), 4, &mut list);
        assert_eq!(list.len(), 1 + 3 + 4);
        let filled = list.items().iter().filter(|c| c.border.is_none() && c.radius == HUD_PIP_RADIUS).count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn banner_tracks_last_message() {
        let mut backend = ring();
        backend.show_message(trove_engine::backend::Message::info("hello"));
        backend.show_message(trove_engine::backend::Message::error("no camera"));
        assert_eq!(backend.banner().map(|m| m.text.as_str()), Some("no camera"));
    }

    #[test]
    fn reset_targets_restores_visibility() {
        let mut backend = ring();
        let ids: Vec<_> = backend.scene().objects().iter().map(|o| o.id).collect();
        for id in &ids {
            backend.mark_found(*id);
        }
        assert_eq!(backend.found_count(), 4);
        backend.reset_targets();
        assert_eq!(backend.found_count(), 0);
        assert_eq!(backend.scene().visible_count(), 4);
    }
}

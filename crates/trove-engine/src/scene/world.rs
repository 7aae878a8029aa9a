use std::f32::consts::TAU;

use trove_gesture::Transform;

use crate::assets::ModelAsset;
use crate::coords::{Vec2, Vec3, Viewport};
use crate::paint::Color;

use super::Camera;

/// Stable handle of a scene object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId(pub u32);

/// A tap target, represented by its bounding sphere.
///
/// `center` is relative to the group pivot, before the group transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
    /// Hidden objects are neither drawn nor hit.
    pub visible: bool,
}

/// Outcome of a tap raycast.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HitResult {
    Hit { id: ObjectId, distance: f32 },
    Miss,
}

impl HitResult {
    pub fn object(self) -> Option<ObjectId> {
        match self {
            HitResult::Hit { id, .. } => Some(id),
            HitResult::Miss => None,
        }
    }
}

const PALETTE: [(u8, u8, u8); 6] = [
    (230, 0, 0),
    (255, 184, 28),
    (0, 176, 202),
    (160, 60, 220),
    (90, 200, 80),
    (240, 120, 170),
];

#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    pivot: Vec3,
    transform: Transform,
    objects: Vec<SceneObject>,
    next_id: u32,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            pivot: Vec3::ZERO,
            transform: Transform { scale: 1.0, rotation: 0.0 },
            objects: Vec::new(),
            next_id: 0,
        }
    }

    /// Lays `count` copies of `model` out on a horizontal ring around the origin
    /// and frames the camera so the ring fits at scale `1.0`.
    pub fn treasure_ring(model: &ModelAsset, count: usize, aspect: f32) -> Self {
        let radius = model.radius.max(0.01);
        let ring = if count > 1 { radius * 3.0 } else { 0.0 };
        let mut scene = Scene::new(Camera::framing(ring + radius, aspect));

        for i in 0..count {
            let angle = i as f32 * TAU / count.max(1) as f32;
            let center = Vec3::new(ring * angle.sin(), 0.0, ring * angle.cos());
            let (r, g, b) = PALETTE[i % PALETTE.len()];
            scene.add(
                format!("{} #{}", model.name, i + 1),
                center,
                radius,
                Color::from_srgb_u8(r, g, b, 255),
            );
        }

        log::debug!("scene: {count} targets on ring r={ring:.2} (model r={radius:.2})");
        scene
    }

    pub fn add(&mut self, name: impl Into<String>, center: Vec3, radius: f32, color: Color) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            name: name.into(),
            center,
            radius,
            color,
            visible: true,
        });
        id
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Returns `false` if `id` is unknown.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(o) => {
                o.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn show_all(&mut self) {
        for o in &mut self.objects {
            o.visible = true;
        }
    }

    pub fn visible_count(&self) -> usize {
        self.objects.iter().filter(|o| o.visible).count()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn world_center(&self, obj: &SceneObject) -> Vec3 {
        self.pivot + obj.center.rotate_y(self.transform.rotation) * self.transform.scale
    }

    pub fn world_radius(&self, obj: &SceneObject) -> f32 {
        obj.radius * self.transform.scale
    }

    /// Where the center of `id` lands on screen, if it is in front of the camera.
    pub fn screen_position(&self, id: ObjectId, viewport: Viewport) -> Option<Vec2> {
        let obj = self.object(id)?;
        let projected = self.camera.project(self.world_center(obj))?;
        Some(viewport.ndc_to_screen(projected.ndc))
    }

    /// Casts a ray from the camera through `ndc` and returns the nearest visible object.
    pub fn raycast(&self, ndc: Vec2) -> HitResult {
        let ray = self.camera.ray_from_ndc(ndc);

        let nearest = self
            .objects
            .iter()
            .filter(|o| o.visible)
            .filter_map(|o| {
                ray.intersect_sphere(self.world_center(o), self.world_radius(o))
                    .map(|t| (o.id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((id, distance)) => HitResult::Hit { id, distance },
            None => HitResult::Miss,
        }
    }
}

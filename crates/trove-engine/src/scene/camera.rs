use crate::coords::{Vec2, Vec3};

use super::Ray;

/// Perspective camera.
///
/// `fov_y` is the full vertical field of view in radians; `aspect` is
/// width / height and must track the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// A world point mapped to the screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projected {
    pub ndc: Vec2,
    /// Distance along the view direction.
    pub depth: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.5, 6.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov_y: 50f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.05,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Camera looking at the origin from a slight elevation, far enough back
    /// that a sphere of `extent` fits vertically.
    pub fn framing(extent: f32, aspect: f32) -> Self {
        let base = Camera::default();
        let half = base.fov_y * 0.5;
        let distance = (extent.max(0.01) / half.sin()) * 1.1;
        let dir = Vec3::new(0.0, 0.35, 1.0).normalized();
        Self {
            eye: dir * distance,
            aspect,
            far: distance * 4.0,
            ..base
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Orthonormal `(forward, right, up)` basis.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye).normalized();
        let right = forward.cross(self.up).normalized();
        let up = right.cross(forward);
        (forward, right, up)
    }

    #[inline]
    fn tan_half_fov(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }

    /// Ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let (forward, right, up) = self.basis();
        let t = self.tan_half_fov();
        let dir = forward + right * (ndc.x * t * self.aspect) + up * (ndc.y * t);
        Ray::new(self.eye, dir)
    }

    /// Projects a world point; `None` when it lies behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let (forward, right, up) = self.basis();
        let d = p - self.eye;
        let depth = d.dot(forward);
        if depth <= self.near {
            return None;
        }

        let t = self.tan_half_fov();
        Some(Projected {
            ndc: Vec2::new(d.dot(right) / (depth * t * self.aspect), d.dot(up) / (depth * t)),
            depth,
        })
    }

    /// Screen-space radius of a sphere at `depth`, as a fraction of the half viewport height.
    pub fn projected_radius(&self, radius: f32, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        radius / (depth * self.tan_half_fov())
    }
}

use crate::coords::Vec3;

/// Half-line `origin + t * dir` for `t >= 0`. `dir` is unit length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir: dir.normalized() }
    }

    #[inline]
    pub fn at(self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Distance along the ray to the first intersection with a sphere.
    ///
    /// Returns the exit distance when the origin is inside the sphere and
    /// `None` when the sphere is missed or entirely behind the origin.
    pub fn intersect_sphere(self, center: Vec3, radius: f32) -> Option<f32> {
        if radius <= 0.0 {
            return None;
        }

        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }

        let s = disc.sqrt();
        let t_near = -b - s;
        let t_far = -b + s;

        if t_far < 0.0 {
            None
        } else if t_near >= 0.0 {
            Some(t_near)
        } else {
            Some(t_far)
        }
    }
}

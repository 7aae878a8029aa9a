//! 3D scene: camera, tap targets, and raycast hit testing.
//!
//! Targets are bounding spheres arranged inside a group. The group's transform
//! (uniform scale + yaw around the pivot) is driven by the gesture
//! interpreter; raycasts and projection always use the transformed positions.

mod camera;
mod ray;
mod world;

pub use camera::{Camera, Projected};
pub use ray::Ray;
pub use world::{HitResult, ObjectId, Scene, SceneObject};

//! Coordinate and geometry types.
//!
//! Screen space (logical pixels):
//! - origin top-left, +X right, +Y down
//!
//! World space (right-handed):
//! - +Y up, camera looks toward -Z by default
//!
//! NDC: `[-1, 1]` on both axes, +Y up.

mod vec3;
mod viewport;

pub use trove_gesture::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;

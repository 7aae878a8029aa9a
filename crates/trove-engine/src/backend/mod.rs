//! Capability interface between the game logic and a rendering backend.
//!
//! A backend only needs to draw a transform, answer raycasts, show
//! messages and hide found targets. [`HuntController`] owns everything
//! else: gesture interpretation, the game session and the camera stream.

mod controller;
mod headless;
mod message;

pub use controller::HuntController;
pub use headless::HeadlessBackend;
pub use message::{Message, MessageKind};

use trove_gesture::Transform;

use crate::coords::Vec2;
use crate::scene::{HitResult, ObjectId};

pub trait Backend {
    /// Applies the latest scale and rotation to the displayed object.
    fn render_transform(&mut self, transform: Transform);

    /// Hit-tests the visible targets at `ndc` (`[-1, 1]`, +Y up).
    fn raycast(&mut self, ndc: Vec2) -> HitResult;

    fn show_message(&mut self, message: Message);

    /// Called once per successful find; the target should stop being hittable.
    fn mark_found(&mut self, id: ObjectId);

    /// Makes every target visible again for a new round.
    fn reset_targets(&mut self) {}
}

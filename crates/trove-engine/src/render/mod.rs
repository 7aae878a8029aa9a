//! GPU rendering subsystem.
//!
//! The viewer projects scene objects to screen space each frame and records
//! them as circles in a [`DrawList`]; [`CircleRenderer`] draws the list in
//! one instanced pass.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod circle;
mod ctx;
mod draw_list;

pub use circle::CircleRenderer;
pub use ctx::{RenderCtx, RenderTarget};
pub use draw_list::{CircleCmd, DrawList};

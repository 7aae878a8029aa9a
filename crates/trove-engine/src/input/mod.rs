//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. The
//! runtime translates platform events into [`InputEvent`]s; pointer and wheel
//! events carry the gesture crate's types so they can be fed to the
//! interpreter unchanged.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};

//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, and wires them to the GPU,
//! input and timing layers.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

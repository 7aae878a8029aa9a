//! Time subsystem.
//!
//! One `FrameClock` per render loop. `tick()` once per presented frame yields
//! the clamped delta used by the game countdown; `elapsed()` provides the
//! monotonic timestamps stamped onto gesture input.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

//! Pointer-gesture interpretation for tap-to-find 3D viewers.
//!
//! This crate has no windowing or GPU dependencies. Hosts translate their
//! platform events into [`PointerEvent`] / [`WheelEvent`], feed them to a
//! [`GestureInterpreter`] together with a per-frame [`tick`], and consume the
//! resulting [`GestureSignal`]s.
//!
//! | Input | Output |
//! |-------|--------|
//! | one contact, little movement | [`GestureSignal::Tap`] (NDC coordinates) |
//! | one contact, horizontal drag | [`GestureSignal::Rotate`] |
//! | two contacts, pinch | [`GestureSignal::ScaleChanged`] (clamped) |
//! | wheel | [`GestureSignal::ScaleChanged`], snaps back after a delay |
//! | two taps within the window | [`GestureSignal::Reset`] |
//!
//! ```rust
//! use std::time::Duration;
//! use trove_gesture::{GestureFrame, GestureInterpreter, PointerEvent, PointerPhase};
//!
//! let mut gestures = GestureInterpreter::with_defaults();
//! gestures.set_viewport(800.0, 600.0);
//!
//! let mut frame = GestureFrame::new();
//! let t = Duration::from_millis(0);
//! gestures.handle_pointer(&mut frame, PointerEvent::touch(1, PointerPhase::Down, 100.0, 300.0, t));
//! gestures.handle_pointer(&mut frame, PointerEvent::touch(1, PointerPhase::Move, 130.0, 300.0, t));
//!
//! assert!((frame.total_rotation() - 0.3).abs() < 1e-5);
//! ```
//!
//! [`tick`]: GestureInterpreter::tick

mod config;
mod interpreter;
mod pointer;
mod signal;
mod vec2;

pub use config::{ConfigError, GestureConfig};
pub use interpreter::{GestureInterpreter, GesturePhase};
pub use pointer::{PointerEvent, PointerId, PointerKind, PointerPhase, WheelEvent};
pub use signal::{GestureFrame, GestureHandler, GestureSignal, Transform};
pub use vec2::Vec2;

//! AR camera stream lifecycle.
//!
//! The desktop build has no camera; [`NoCamera`] always reports
//! [`CameraError::NotFound`] and the controller stays in viewer mode.

mod error;
mod stream;

pub use error::CameraError;
pub use stream::{CameraSource, CameraStream, MediaTrack, NoCamera, ViewMode};

use std::fmt;

/// Failure to acquire a camera stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    PermissionDenied,
    NotFound,
    Unavailable(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => {
                write!(f, "camera access was denied; allow camera access to play in AR")
            }
            CameraError::NotFound => write!(f, "no camera found on this device"),
            CameraError::Unavailable(reason) => write!(f, "camera unavailable: {reason}"),
        }
    }
}

impl std::error::Error for CameraError {}

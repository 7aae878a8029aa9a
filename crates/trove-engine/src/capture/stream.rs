use super::CameraError;

/// One live media track (video, usually). Stopping is idempotent on our side:
/// [`CameraStream`] calls [`MediaTrack::stop`] at most once per track.
pub trait MediaTrack {
    fn label(&self) -> &str;
    fn stop(&mut self);
}

/// Something that can hand out a camera stream.
pub trait CameraSource {
    fn acquire(&mut self) -> Result<CameraStream, CameraError>;
}

/// Owns the tracks of an acquired stream and releases them exactly once.
pub struct CameraStream {
    tracks: Vec<Box<dyn MediaTrack>>,
    stopped: bool,
}

impl CameraStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks, stopped: false }
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_live(&self) -> bool {
        !self.stopped
    }

    /// Stops every track. Subsequent calls do nothing.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        for track in &mut self.tracks {
            log::debug!("stopping camera track '{}'", track.label());
            track.stop();
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream")
            .field("tracks", &self.tracks.len())
            .field("stopped", &self.stopped)
            .finish()
    }
}

/// Camera source for platforms without one.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCamera;

impl CameraSource for NoCamera {
    fn acquire(&mut self) -> Result<CameraStream, CameraError> {
        Err(CameraError::NotFound)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewMode {
    /// Model composited over the live camera feed.
    Ar,
    /// Plain 3D viewer.
    Viewer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingTrack {
        stops: Rc<Cell<u32>>,
    }

    impl MediaTrack for CountingTrack {
        fn label(&self) -> &str {
            "test-video"
        }

        fn stop(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    fn stream_with(n: usize, stops: &Rc<Cell<u32>>) -> CameraStream {
        let tracks = (0..n)
            .map(|_| Box::new(CountingTrack { stops: Rc::clone(stops) }) as Box<dyn MediaTrack>)
            .collect();
        CameraStream::new(tracks)
    }

    #[test]
    fn stop_releases_every_track_once() {
        let stops = Rc::new(Cell::new(0));
        let mut s = stream_with(2, &stops);
        s.stop();
        s.stop();
        assert_eq!(stops.get(), 2);
        assert!(!s.is_live());
        drop(s);
        assert_eq!(stops.get(), 2);
    }

    #[test]
    fn drop_stops_live_tracks() {
        let stops = Rc::new(Cell::new(0));
        {
            let _s = stream_with(3, &stops);
        }
        assert_eq!(stops.get(), 3);
    }

    #[test]
    fn no_camera_reports_not_found() {
        assert_eq!(NoCamera.acquire().unwrap_err(), CameraError::NotFound);
    }

    #[test]
    fn errors_read_as_sentences() {
        assert_eq!(CameraError::NotFound.to_string(), "no camera found on this device");
        assert!(CameraError::Unavailable("busy".into()).to_string().ends_with("busy"));
    }
}

//! Trove engine crate.
//!
//! Game rules, scene raycasting and the capability interface a rendering
//! backend implements, plus the winit/wgpu runtime the desktop viewer runs on.
//!
//! The gesture interpreter lives in `trove-gesture` and is re-exported here
//! as [`gesture`].

pub use trove_gesture as gesture;

pub mod assets;
pub mod backend;
pub mod capture;
pub mod game;
pub mod scene;

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

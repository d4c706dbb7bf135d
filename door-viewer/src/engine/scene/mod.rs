//! Static scene content around the model: lights and the viewer camera.

/// Key directional light and ambient fill.
pub mod lighting;

/// Perspective camera spawned from the viewer config.
pub mod viewer_camera;

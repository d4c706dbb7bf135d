//! Runtime configuration assets.

/// `viewer.json`: model path, door node names, marker and camera settings.
pub mod viewer_config;

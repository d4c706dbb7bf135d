//! Orbit camera for inspecting the loaded model.
//!
//! Left-drag orbits around the model origin with damping, the wheel zooms
//! within a clamped distance range. Panning is disabled.

/// Orbit camera resource and controller system.
pub mod orbit_camera;

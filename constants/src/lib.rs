//! Shared defaults for the door viewer.
//!
//! Everything here can be overridden at runtime through `viewer.json`;
//! these values apply when the config asset is absent or invalid.

pub mod camera;
pub mod door;
pub mod host;
pub mod lighting;

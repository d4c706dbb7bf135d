//! Core application setup and state management.
//!
//! Handles host page mounting, window configuration, plugin setup and the
//! loading state machine for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Application states from config loading to runtime.
pub mod app_state;

/// Canvas creation inside the host page container (WASM).
pub mod mount;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds to the mounted canvas on web targets and sets vsync.
pub mod window_config;

//! Loading pipeline for the viewer config and the model asset.
//!
//! Config first (so the model path and door names are known), then the glTF
//! model. Door binding itself happens in the interaction layer once the
//! scene has spawned; this module only watches for it or for a failure.

/// `viewer.json` loading with fallback to built-in defaults.
pub mod config_loader;

/// glTF model loading and failure detection.
pub mod model_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

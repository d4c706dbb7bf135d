use thiserror::Error;

use crate::interaction::state::DoorSide;

/// Failures the viewer reports. None of them are fatal: each one is logged
/// where it is detected and the app keeps running.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("mount point `{0}` not found in host page")]
    MissingContainer(String),

    #[error("host page unavailable: {0}")]
    HostUnavailable(String),

    #[error("invalid viewer config: {0}")]
    InvalidConfig(String),

    #[error("model `{path}` failed to load: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("{side} door node `{name}` not found in model")]
    MissingDoorNode { side: DoorSide, name: String },

    #[error("degenerate viewport {width}x{height}")]
    DegenerateViewport { width: f32, height: f32 },
}

pub type ViewerResult<T> = Result<T, ViewerError>;

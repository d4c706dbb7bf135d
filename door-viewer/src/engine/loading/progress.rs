use bevy::prelude::*;

/// Loading milestones driving the `AppState` transitions.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub config_resolved: bool,
    pub model_requested: bool,
    pub model_bound: bool,
    pub model_failed: bool,
}

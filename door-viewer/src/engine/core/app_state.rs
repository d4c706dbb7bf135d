use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Configuring,
    LoadingModel,
    Running,
    LoadFailed,
}

/// Where loading should go next, if anywhere.
pub fn next_loading_state(current: AppState, progress: &LoadingProgress) -> Option<AppState> {
    match current {
        AppState::Configuring if progress.config_resolved => Some(AppState::LoadingModel),
        AppState::LoadingModel if progress.model_failed => Some(AppState::LoadFailed),
        AppState::LoadingModel if progress.model_bound => Some(AppState::Running),
        _ => None,
    }
}

pub fn advance_loading_state(
    loading_progress: Res<LoadingProgress>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if let Some(next) = next_loading_state(*state.get(), &loading_progress) {
        info!("→ Transitioning to {:?} state", next);
        next_state.set(next);
    }
}

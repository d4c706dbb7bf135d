use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::error::ViewerError;
use crate::engine::loading::progress::LoadingProgress;
use constants::host::VIEWER_CONFIG_PATH;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<ViewerConfig>>,
}

// Start loading viewer.json
pub fn start_config_load(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading viewer config from {}", VIEWER_CONFIG_PATH);
    config_loader.handle = Some(asset_server.load(VIEWER_CONFIG_PATH));
}

/// Pick the loaded config if it is valid, otherwise keep the defaults.
pub fn accept_config(loaded: &ViewerConfig) -> Result<ViewerConfig, ViewerError> {
    loaded.validate()?;
    Ok(loaded.clone())
}

// Resolve the config once it has loaded or failed
pub fn resolve_viewer_config(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<ViewerConfig>>,
    mut commands: Commands,
) {
    if loading_progress.config_resolved {
        return;
    }
    let Some(ref handle) = config_loader.handle else {
        return;
    };

    if let Some(loaded) = configs.get(handle) {
        match accept_config(loaded) {
            Ok(config) => {
                info!("✓ Viewer config loaded (model: {})", config.model_path);
                commands.insert_resource(config);
            }
            Err(err) => warn!("{err}, using defaults"),
        }
        loading_progress.config_resolved = true;
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!(
            "{}, using defaults",
            ViewerError::InvalidConfig(format!("{VIEWER_CONFIG_PATH}: {err}"))
        );
        loading_progress.config_resolved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_is_accepted() {
        let mut loaded = ViewerConfig::default();
        loaded.model_path = "models/cabinet.glb".into();
        assert_eq!(accept_config(&loaded).unwrap().model_path, "models/cabinet.glb");
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut loaded = ViewerConfig::default();
        loaded.doors.right = loaded.doors.left.clone();
        let err = accept_config(&loaded).unwrap_err();
        assert!(err.to_string().starts_with("invalid viewer config"));
    }
}

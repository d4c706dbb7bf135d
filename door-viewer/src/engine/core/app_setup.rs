use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_controller};
use crate::engine::core::app_state::{AppState, advance_loading_state};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    ConfigLoader, resolve_viewer_config, start_config_load,
};
use crate::engine::loading::model_loader::{
    ModelLoadFailedEvent, ModelLoader, check_model_loading, spawn_model,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::viewer_camera::spawn_viewer_camera;
use crate::interaction::InteractionPlugin;
use crate::interaction::binding::create_marker_assets;
use crate::rpc::web_rpc::WebRpcPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,door_viewer=info";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers ViewerConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerConfig>::new(&["json"]))
        .add_plugins(InteractionPlugin)
        .add_plugins(WebRpcPlugin);

    // Defaults stay in place until viewer.json resolves
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<ModelLoader>()
        .init_resource::<ViewerConfig>()
        .init_resource::<OrbitCamera>()
        .add_event::<ModelLoadFailedEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (spawn_lighting, start_config_load))
        .add_systems(
            Update,
            resolve_viewer_config.run_if(in_state(AppState::Configuring)),
        )
        .add_systems(
            OnEnter(AppState::LoadingModel),
            (spawn_viewer_camera, create_marker_assets, spawn_model),
        )
        .add_systems(
            Update,
            check_model_loading.run_if(in_state(AppState::LoadingModel)),
        )
        .add_systems(Update, (advance_loading_state, orbit_camera_controller));

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}

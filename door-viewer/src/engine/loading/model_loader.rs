use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::error::ViewerError;
use crate::engine::loading::progress::LoadingProgress;
use crate::interaction::session::ViewerSession;
use crate::interaction::state::ModelRoot;

#[derive(Resource, Default)]
pub struct ModelLoader {
    path: String,
    gltf: Option<Handle<Gltf>>,
}

/// The model asset could not be loaded. The app stays up with an empty scene.
#[derive(Event, Debug, Clone)]
pub struct ModelLoadFailedEvent {
    pub path: String,
    pub reason: String,
}

// Kick off the glTF load and spawn its first scene under a ModelRoot
pub fn spawn_model(
    mut commands: Commands,
    mut model_loader: ResMut<ModelLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
) {
    let path = config.model_path.clone();
    info!("Loading model from {}", path);

    model_loader.gltf = Some(asset_server.load(path.clone()));
    commands.spawn((
        Name::new("model"),
        ModelRoot,
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()))),
    ));
    model_loader.path = path;
    loading_progress.model_requested = true;
}

pub fn check_model_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    model_loader: Res<ModelLoader>,
    asset_server: Res<AssetServer>,
    session: Res<ViewerSession>,
    mut failures: EventWriter<ModelLoadFailedEvent>,
) {
    if loading_progress.model_bound || loading_progress.model_failed {
        return;
    }

    if session.is_bound() {
        info!("✓ Model loaded and bound");
        loading_progress.model_bound = true;
        return;
    }

    let Some(ref handle) = model_loader.gltf else {
        return;
    };
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        let err = ViewerError::AssetLoad {
            path: model_loader.path.clone(),
            reason: err.to_string(),
        };
        error!("{err}");
        loading_progress.model_failed = true;
        failures.write(ModelLoadFailedEvent {
            path: model_loader.path.clone(),
            reason: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::app_state::{AppState, advance_loading_state};
    use crate::interaction::session::DoorBinding;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    fn loading_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Gltf>()
            .insert_state(AppState::LoadingModel)
            .init_resource::<LoadingProgress>()
            .init_resource::<ModelLoader>()
            .init_resource::<ViewerSession>()
            .add_event::<ModelLoadFailedEvent>()
            .add_systems(
                Update,
                (check_model_loading, advance_loading_state)
                    .chain()
                    .run_if(in_state(AppState::LoadingModel)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    /// Load IO runs on the task pool, so give it a bounded number of frames.
    fn update_until_settled(app: &mut App) {
        for _ in 0..400 {
            app.update();
            if state(app) != AppState::LoadingModel {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn missing_model_fails_loading() {
        let mut app = loading_app();
        let path = "models/does-not-exist.glb";
        let handle = app.world().resource::<AssetServer>().load::<Gltf>(path);
        {
            let mut loader = app.world_mut().resource_mut::<ModelLoader>();
            loader.path = path.to_string();
            loader.gltf = Some(handle);
        }

        update_until_settled(&mut app);

        assert_eq!(state(&app), AppState::LoadFailed);
        let progress = app.world().resource::<LoadingProgress>();
        assert!(progress.model_failed);
        assert!(!progress.model_bound);

        let failures: Vec<ModelLoadFailedEvent> = app
            .world_mut()
            .resource_mut::<Events<ModelLoadFailedEvent>>()
            .drain()
            .collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, path);
        assert!(failures[0].reason.contains(path));
    }

    #[test]
    fn bound_session_finishes_loading() {
        let mut app = loading_app();
        app.update();
        assert_eq!(state(&app), AppState::LoadingModel);

        app.world_mut().resource_mut::<ViewerSession>().bind(
            Some(DoorBinding {
                door: Entity::from_raw(1),
                marker: Entity::from_raw(2),
            }),
            None,
        );
        update_until_settled(&mut app);

        assert_eq!(state(&app), AppState::Running);
        assert!(app.world().resource::<LoadingProgress>().model_bound);
        assert!(app.world().resource::<Events<ModelLoadFailedEvent>>().is_empty());
    }
}

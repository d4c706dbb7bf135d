use bevy::prelude::*;

use crate::engine::assets::viewer_config::{CameraConfig, ViewerConfig};
use crate::engine::camera::orbit_camera::OrbitCamera;

pub fn perspective_from_config(config: &CameraConfig) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: config.fov_degrees.to_radians(),
        near: config.near,
        far: config.far,
        ..default()
    }
}

// Spawn the camera once the config is known
pub fn spawn_viewer_camera(mut commands: Commands, config: Res<ViewerConfig>) {
    let orbit = OrbitCamera::from_config(&config.camera, Vec3::ZERO);
    commands.spawn((
        Name::new("viewer_camera"),
        Camera3d::default(),
        Projection::Perspective(perspective_from_config(&config.camera)),
        orbit.transform(),
    ));
    commands.insert_resource(orbit);
}

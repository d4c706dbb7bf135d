use bevy::prelude::*;
use constants::lighting::{AMBIENT_BRIGHTNESS, KEY_LIGHT_ILLUMINANCE, KEY_LIGHT_POSITION};

pub fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        Name::new("key_light"),
        DirectionalLight {
            color: Color::WHITE,
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(KEY_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
}

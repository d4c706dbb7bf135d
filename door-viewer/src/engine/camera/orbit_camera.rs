use crate::engine::assets::viewer_config::CameraConfig;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP};

/// Orbit around a fixed target with damped rotation and clamped zoom.
/// Panning is not supported; the target stays at the model origin.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
}

impl OrbitCamera {
    /// Place the orbit so its eye starts at the configured position.
    pub fn from_config(config: &CameraConfig, target: Vec3) -> Self {
        let offset = Vec3::from_array(config.start_position) - target;
        let length = offset.length();
        let (yaw, pitch) = if length > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / length).asin())
        } else {
            (0.0, 0.0)
        };

        Self {
            target,
            yaw,
            pitch: pitch.clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT),
            distance: length.clamp(config.min_distance, config.max_distance),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            damping: config.damping,
        }
    }

    /// Feed a drag delta in pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw_velocity -= drag.x * ORBIT_ROTATE_SPEED;
        self.pitch_velocity += drag.y * ORBIT_ROTATE_SPEED;
    }

    /// Positive `lines` zooms in.
    pub fn zoom(&mut self, lines: f32) {
        let scale = ORBIT_ZOOM_STEP.powf(lines);
        self.distance = (self.distance * scale).clamp(self.min_distance, self.max_distance);
    }

    /// One frame of damped motion. With zero damping the pending rotation is
    /// applied in full.
    pub fn step(&mut self) {
        let factor = if self.damping > 0.0 { self.damping } else { 1.0 };
        self.yaw += self.yaw_velocity * factor;
        self.pitch = (self.pitch + self.pitch_velocity * factor)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.yaw_velocity *= 1.0 - factor;
        self.pitch_velocity *= 1.0 - factor;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), Vec3::ZERO)
    }
}

pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    orbit.step();

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        *camera_transform = orbit.transform();
    }
}

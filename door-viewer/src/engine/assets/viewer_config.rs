use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::error::{ViewerError, ViewerResult};
use crate::interaction::state::DoorSide;
use constants::{camera, door, host};

/// Scene node names bound to each door role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorNodeNames {
    pub left: String,
    pub right: String,
}

impl Default for DoorNodeNames {
    fn default() -> Self {
        Self {
            left: door::LEFT_DOOR_NODE.to_string(),
            right: door::RIGHT_DOOR_NODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub offset: [f32; 3],
    pub radius: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            offset: door::MARKER_LOCAL_OFFSET,
            radius: door::MARKER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start_position: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: camera::CAMERA_FOV_DEGREES,
            near: camera::CAMERA_NEAR,
            far: camera::CAMERA_FAR,
            start_position: camera::CAMERA_START_POSITION,
            min_distance: camera::ORBIT_MIN_DISTANCE,
            max_distance: camera::ORBIT_MAX_DISTANCE,
            damping: camera::ORBIT_DAMPING_FACTOR,
        }
    }
}

/// Runtime viewer settings, loaded from `viewer.json`. Every field is
/// optional in the file; missing ones take the `constants` defaults.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_path: String,
    pub doors: DoorNodeNames,
    pub marker: MarkerConfig,
    pub swing_seconds: f32,
    pub camera: CameraConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: host::DEFAULT_MODEL_PATH.to_string(),
            doors: DoorNodeNames::default(),
            marker: MarkerConfig::default(),
            swing_seconds: door::DOOR_SWING_SECONDS,
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn door_node_name(&self, side: DoorSide) -> &str {
        match side {
            DoorSide::Left => &self.doors.left,
            DoorSide::Right => &self.doors.right,
        }
    }

    pub fn marker_offset(&self) -> Vec3 {
        Vec3::from_array(self.marker.offset)
    }

    /// Check the role→node mapping and numeric ranges.
    pub fn validate(&self) -> ViewerResult<()> {
        let invalid = |msg: String| Err(ViewerError::InvalidConfig(msg));

        if self.model_path.trim().is_empty() {
            return invalid("model_path is empty".into());
        }
        for side in DoorSide::ALL {
            if self.door_node_name(side).trim().is_empty() {
                return invalid(format!("{side} door node name is empty"));
            }
        }
        if self.doors.left == self.doors.right {
            return invalid(format!(
                "both doors are mapped to the same node `{}`",
                self.doors.left
            ));
        }
        if !(self.marker.radius > 0.0) {
            return invalid(format!("marker radius {} must be positive", self.marker.radius));
        }
        if !(self.swing_seconds >= 0.0) {
            return invalid(format!("swing_seconds {} must not be negative", self.swing_seconds));
        }
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return invalid(format!("camera fov {} out of range", cam.fov_degrees));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return invalid(format!("camera clip range {}..{} invalid", cam.near, cam.far));
        }
        if !(cam.min_distance > 0.0 && cam.max_distance >= cam.min_distance) {
            return invalid(format!(
                "orbit distance range {}..{} invalid",
                cam.min_distance, cam.max_distance
            ));
        }
        if !(0.0..=1.0).contains(&cam.damping) {
            return invalid(format!("orbit damping {} must be within 0..=1", cam.damping));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.door_node_name(DoorSide::Left), "leftDoor");
        assert_eq!(config.door_node_name(DoorSide::Right), "rightDoor");
        assert_eq!(config.swing_seconds, 0.5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "doors": { "right": "Door_R" }, "swing_seconds": 0.8 }"#)
                .unwrap();
        assert_eq!(config.doors.left, "leftDoor");
        assert_eq!(config.doors.right, "Door_R");
        assert_eq!(config.swing_seconds, 0.8);
        assert_eq!(config.model_path, "models/model-demo.glb");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn duplicate_door_names_rejected() {
        let mut config = ViewerConfig::default();
        config.doors.right = config.doors.left.clone();
        assert!(matches!(config.validate(), Err(ViewerError::InvalidConfig(_))));
    }

    #[test]
    fn empty_door_name_rejected() {
        let mut config = ViewerConfig::default();
        config.doors.left = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("left door node name is empty"));
    }

    #[test]
    fn inverted_orbit_range_rejected() {
        let mut config = ViewerConfig::default();
        config.camera.min_distance = 30.0;
        assert!(config.validate().is_err());
    }
}

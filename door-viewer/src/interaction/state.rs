use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two doors a target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorSide {
    Left,
    Right,
}

impl DoorSide {
    pub const ALL: [DoorSide; 2] = [DoorSide::Left, DoorSide::Right];

    /// Parse a side identifier coming from the host page.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for DoorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a pickable entity plays. Markers outrank doors when both are hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetRole {
    Marker(DoorSide),
    Door(DoorSide),
}

impl TargetRole {
    pub fn side(&self) -> DoorSide {
        match *self {
            Self::Marker(side) | Self::Door(side) => side,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }
}

/// Handle into the scene graph tagged with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickableTarget {
    pub entity: Entity,
    pub role: TargetRole,
}

/// Open/closed bit per door. `true` means open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorStates {
    pub left: bool,
    pub right: bool,
}

impl DoorStates {
    pub fn is_open(&self, side: DoorSide) -> bool {
        match side {
            DoorSide::Left => self.left,
            DoorSide::Right => self.right,
        }
    }

    /// Flip the bit for `side` and return the new value.
    pub fn toggle(&mut self, side: DoorSide) -> bool {
        let bit = match side {
            DoorSide::Left => &mut self.left,
            DoorSide::Right => &mut self.right,
        };
        *bit = !*bit;
        *bit
    }
}

// Components

/// A bound door node. Rotation is kept as XYZ Euler angles so the swing
/// angle can be written directly without decomposing the quaternion, which
/// is singular at the ±90° open positions.
#[derive(Component, Debug, Clone, Copy)]
pub struct DoorNode {
    pub side: DoorSide,
    pub euler_x: f32,
    pub euler_z: f32,
    /// Current swing angle around Y, radians.
    pub angle: f32,
}

impl DoorNode {
    pub fn from_transform(side: DoorSide, transform: &Transform) -> Self {
        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        Self {
            side,
            euler_x: x,
            euler_z: z,
            angle: y,
        }
    }

    pub fn set_angle(&mut self, angle: f32, transform: &mut Transform) {
        self.angle = angle;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, self.euler_x, angle, self.euler_z);
    }
}

/// Marks the clickable sphere attached to a door.
#[derive(Component, Debug, Clone, Copy)]
pub struct DoorMarker {
    pub side: DoorSide,
    pub radius: f32,
}

/// Marks the root entity of the loaded model scene.
#[derive(Component, Debug, Default)]
pub struct ModelRoot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_parity_per_side() {
        for side in DoorSide::ALL {
            let mut states = DoorStates::default();
            for clicks in 1..=7 {
                let open = states.toggle(side);
                assert_eq!(open, clicks % 2 == 1, "{side} after {clicks} clicks");
            }
        }
    }

    #[test]
    fn sides_toggle_independently() {
        let mut states = DoorStates::default();
        states.toggle(DoorSide::Left);
        assert!(states.is_open(DoorSide::Left));
        assert!(!states.is_open(DoorSide::Right));
    }

    #[test]
    fn side_parsing_is_case_insensitive() {
        assert_eq!(DoorSide::from_string("LEFT"), Some(DoorSide::Left));
        assert_eq!(DoorSide::from_string("right"), Some(DoorSide::Right));
        assert_eq!(DoorSide::from_string("middle"), None);
    }
}

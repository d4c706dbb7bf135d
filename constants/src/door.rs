/// Scene node name bound to the left door role
pub const LEFT_DOOR_NODE: &str = "leftDoor";

/// Scene node name bound to the right door role
pub const RIGHT_DOOR_NODE: &str = "rightDoor";

/// Open angle of the left door around Y, radians (-90°)
pub const LEFT_DOOR_OPEN_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;

/// Open angle of the right door around Y, radians (+90°)
pub const RIGHT_DOOR_OPEN_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Closed angle shared by both doors
pub const DOOR_CLOSED_ANGLE: f32 = 0.0;

/// Seconds taken by one open/close swing
pub const DOOR_SWING_SECONDS: f32 = 0.5;

/// Marker position in door-local space (centre height, on the surface)
pub const MARKER_LOCAL_OFFSET: [f32; 3] = [0.0, 1.0, 0.0];

/// Marker sphere radius, door-local units
pub const MARKER_RADIUS: f32 = 0.1;

/// Marker sphere tessellation (sectors, stacks)
pub const MARKER_RESOLUTION: (u32, u32) = (32, 32);

/// Vertical field of view, degrees
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Initial camera position; the orbit target is the origin
pub const CAMERA_START_POSITION: [f32; 3] = [0.0, 0.0, 10.0];

/// Closest orbit distance (zoom in limit)
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;

/// Furthest orbit distance (zoom out limit)
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;

/// Fraction of orbit velocity shed each frame
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

/// Radians of orbit per pixel of drag
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;

/// Zoom scale applied per scroll line
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

/// Pitch limit short of the poles, radians
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

/// Pointer travel (logical px) between press and release still counted as a click
pub const CLICK_DRAG_TOLERANCE_PX: f32 = 4.0;

/// Key light position; it points at the origin
pub const KEY_LIGHT_POSITION: [f32; 3] = [5.0, 10.0, 7.5];

/// Key light illuminance, lux
pub const KEY_LIGHT_ILLUMINANCE: f32 = 8_000.0;

/// Ambient brightness, half the key light's contribution
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

use bevy::prelude::*;

/// World-space ray built from one pointer click. Direction is unit length,
/// so hit parameters are distances from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PointerRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }
}

/// Map a pointer position in container pixels to normalized device
/// coordinates. Screen Y grows down, NDC Y grows up.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (pointer.x / viewport.x) * 2.0 - 1.0,
        -(pointer.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Unproject an NDC point into a world ray.
///
/// Uses depths 1.0 (near) and `f32::EPSILON` (far) which matches Bevy's
/// reversed-Z perspective projection.
pub fn unproject(ndc: Vec2, clip_from_view: Mat4, world_from_view: Mat4) -> Option<PointerRay> {
    let world_from_clip = world_from_view * clip_from_view.inverse();
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    PointerRay::new(near, far - near)
}

/// Ray against a box given in an entity's local space (`center` and
/// `half_extents` as stored on its `Aabb`). Returns the world hit distance.
pub fn ray_hits_obb(
    ray: &PointerRay,
    world_from_local: Mat4,
    center: Vec3,
    half_extents: Vec3,
) -> Option<f32> {
    let inv = world_from_local.inverse();
    let o_local = inv.transform_point3(ray.origin);
    let d_local = inv.transform_vector3(ray.direction);
    ray_aabb_hit_t(o_local, d_local, center - half_extents, center + half_extents)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for axis in 0..3 {
        let (o, lo, hi) = (ray_origin[axis], min[axis], max[axis]);
        if inv[axis].is_infinite() {
            // Parallel to this slab: miss unless the origin lies inside it.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((lo - o) * inv[axis], (hi - o) * inv[axis]);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}

/// Ray against a sphere. Returns the nearest non-negative hit distance.
pub fn ray_sphere_hit_t(ray: &PointerRay, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_d = disc.sqrt();
    let t_near = -b - sqrt_d;
    let t_far = -b + sqrt_d;
    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::render::camera::{CameraProjection, PerspectiveProjection};

    fn down_z() -> PointerRay {
        PointerRay::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn ndc_corners_and_centre() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(Vec2::ZERO, viewport), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(viewport, viewport), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(viewport * 0.5, viewport), Some(Vec2::ZERO));
    }

    #[test]
    fn ndc_rejects_empty_viewport() {
        assert_eq!(pointer_to_ndc(Vec2::ONE, Vec2::new(800.0, 0.0)), None);
    }

    #[test]
    fn centre_ray_follows_camera_forward() {
        let projection = PerspectiveProjection {
            fov: 75f32.to_radians(),
            aspect_ratio: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
        };
        let camera = Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
        let ray = unproject(
            Vec2::ZERO,
            projection.get_clip_from_view(),
            camera.compute_matrix(),
        )
        .unwrap();

        assert_relative_eq!(ray.direction.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(ray.origin.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ray.origin.z, 9.9, epsilon = 1e-3);
    }

    #[test]
    fn unit_box_hit_distance() {
        let t = ray_hits_obb(&down_z(), Mat4::IDENTITY, Vec3::ZERO, Vec3::ONE).unwrap();
        assert_relative_eq!(t, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn box_center_offset_is_respected() {
        let miss = ray_hits_obb(&down_z(), Mat4::IDENTITY, Vec3::new(3.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(miss, None);
    }

    #[test]
    fn rotated_box_is_tested_in_local_space() {
        // Thin slab along X, rotated 90° about Y so it now spans Z.
        let xf = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let ray = PointerRay::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();
        let t = ray_hits_obb(&ray, xf, Vec3::ZERO, Vec3::new(2.0, 1.0, 0.1)).unwrap();
        assert_relative_eq!(t, 8.0, epsilon = 1e-4);
    }

    #[test]
    fn ray_starting_inside_box_hits_exit() {
        let ray = PointerRay::new(Vec3::ZERO, Vec3::X).unwrap();
        let t = ray_aabb_hit_t(ray.origin, ray.direction, Vec3::splat(-1.0), Vec3::ONE).unwrap();
        assert_relative_eq!(t, 1.0);
    }

    #[test]
    fn box_behind_ray_misses() {
        let ray = PointerRay::new(Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z).unwrap();
        assert_eq!(ray_hits_obb(&ray, Mat4::IDENTITY, Vec3::ZERO, Vec3::ONE), None);
    }

    #[test]
    fn sphere_hit_and_miss() {
        let t = ray_sphere_hit_t(&down_z(), Vec3::ZERO, 0.5).unwrap();
        assert_relative_eq!(t, 9.5, epsilon = 1e-5);
        assert_eq!(ray_sphere_hit_t(&down_z(), Vec3::new(1.0, 0.0, 0.0), 0.5), None);
    }
}

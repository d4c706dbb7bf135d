use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::engine::error::{ViewerError, ViewerResult};

/// Surface size and aspect to commit after a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportUpdate {
    pub width: f32,
    pub height: f32,
    pub aspect: f32,
}

pub fn compute_viewport(width: f32, height: f32) -> ViewerResult<ViewportUpdate> {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(width) || !usable(height) {
        return Err(ViewerError::DegenerateViewport { width, height });
    }
    Ok(ViewportUpdate {
        width,
        height,
        aspect: width / height,
    })
}

/// Commit the aspect to a perspective projection. Returns whether anything
/// changed.
pub fn apply_aspect(update: &ViewportUpdate, projection: &mut Projection) -> bool {
    match projection {
        Projection::Perspective(perspective) if perspective.aspect_ratio != update.aspect => {
            perspective.aspect_ratio = update.aspect;
            true
        }
        _ => false,
    }
}

/// Keeps the camera aspect and window surface in step with the host
/// container. Only the last resize of a frame is applied.
pub fn sync_viewport_on_resize(
    mut resized: EventReader<WindowResized>,
    mut windows: Query<&mut Window>,
    mut projections: Query<&mut Projection, With<Camera3d>>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };

    let update = match compute_viewport(event.width, event.height) {
        Ok(update) => update,
        Err(err) => {
            warn!("{err}, keeping previous projection");
            return;
        }
    };

    for mut projection in &mut projections {
        if apply_aspect(&update, projection.bypass_change_detection()) {
            projection.set_changed();
        }
    }

    if let Ok(mut window) = windows.get_mut(event.window) {
        if window.width() != update.width || window.height() != update.height {
            window.resolution.set(update.width, update.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::window::WindowResolution;

    fn perspective() -> Projection {
        Projection::Perspective(PerspectiveProjection {
            aspect_ratio: 1.0,
            ..default()
        })
    }

    fn aspect_of(projection: &Projection) -> f32 {
        match projection {
            Projection::Perspective(p) => p.aspect_ratio,
            _ => panic!("expected perspective projection"),
        }
    }

    #[test]
    fn aspect_is_width_over_height() {
        let update = compute_viewport(1280.0, 720.0).unwrap();
        assert_relative_eq!(update.aspect, 1280.0 / 720.0);
        assert_eq!((update.width, update.height), (1280.0, 720.0));
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let mut projection = perspective();
        let update = compute_viewport(800.0, 400.0).unwrap();
        assert!(apply_aspect(&update, &mut projection));
        assert!(!apply_aspect(&update, &mut projection));
        assert_relative_eq!(aspect_of(&projection), 2.0);
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        for (w, h) in [(800.0, 0.0), (0.0, 600.0), (-1.0, 5.0), (f32::NAN, 5.0)] {
            assert!(matches!(
                compute_viewport(w, h),
                Err(ViewerError::DegenerateViewport { .. })
            ));
        }
    }

    #[derive(Resource, Default)]
    struct WindowChanges(usize);

    fn count_window_changes(
        changed: Query<(), Changed<Window>>,
        mut count: ResMut<WindowChanges>,
    ) {
        count.0 += changed.iter().count();
    }

    fn resize_app() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowResized>()
            .init_resource::<WindowChanges>()
            .add_systems(Update, (sync_viewport_on_resize, count_window_changes).chain());
        let camera = app.world_mut().spawn((Camera3d::default(), perspective())).id();
        let window = app
            .world_mut()
            .spawn(Window {
                resolution: WindowResolution::new(800.0, 600.0),
                ..default()
            })
            .id();
        (app, camera, window)
    }

    fn resize(app: &mut App, window: Entity, width: f32, height: f32) {
        app.world_mut().send_event(WindowResized {
            window,
            width,
            height,
        });
        app.update();
    }

    #[test]
    fn resize_sets_surface_size_once() {
        let (mut app, camera, window) = resize_app();

        resize(&mut app, window, 1000.0, 500.0);
        let surface = app.world().get::<Window>(window).unwrap();
        assert_eq!((surface.width(), surface.height()), (1000.0, 500.0));
        assert_relative_eq!(aspect_of(app.world().get::<Projection>(camera).unwrap()), 2.0);
        let changes = app.world().resource::<WindowChanges>().0;

        resize(&mut app, window, 1000.0, 500.0);
        let surface = app.world().get::<Window>(window).unwrap();
        assert_eq!((surface.width(), surface.height()), (1000.0, 500.0));
        assert_eq!(app.world().resource::<WindowChanges>().0, changes);
    }

    #[test]
    fn zero_height_resize_keeps_projection_and_surface() {
        let (mut app, camera, window) = resize_app();

        resize(&mut app, window, 1000.0, 500.0);
        resize(&mut app, window, 1000.0, 0.0);
        assert_relative_eq!(aspect_of(app.world().get::<Projection>(camera).unwrap()), 2.0);
        let surface = app.world().get::<Window>(window).unwrap();
        assert_eq!((surface.width(), surface.height()), (1000.0, 500.0));
    }
}

use bevy::prelude::*;

use super::session::ViewerSession;
use super::state::{DoorNode, DoorSide};

/// Identifies one door animation. A newer handle for the same side
/// supersedes older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(pub u64);

/// Quadratic ease-out.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Animates the Y Euler angle of a door from `from` to `to`.
#[derive(Component, Debug, Clone, Copy)]
pub struct RotationTween {
    pub handle: TweenHandle,
    pub side: DoorSide,
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl RotationTween {
    pub fn new(handle: TweenHandle, side: DoorSide, from: f32, to: f32, duration: f32) -> Self {
        Self {
            handle,
            side,
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * ease_out_quad(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the new angle.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }
}

/// Steps every in-flight door tween and retires finished ones.
pub fn advance_rotation_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<ViewerSession>,
    mut doors: Query<(Entity, &mut Transform, &mut DoorNode, &mut RotationTween)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut door, mut tween) in &mut doors {
        if session.active_tween(tween.side) != Some(tween.handle) {
            commands.entity(entity).remove::<RotationTween>();
            continue;
        }
        let angle = tween.advance(dt);
        door.set_angle(angle, &mut transform);
        if tween.is_finished() {
            session.finish_tween(tween.side, tween.handle);
            commands.entity(entity).remove::<RotationTween>();
        }
    }
}

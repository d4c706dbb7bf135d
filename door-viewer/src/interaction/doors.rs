use bevy::prelude::*;

use super::session::ViewerSession;
use super::state::{DoorNode, DoorSide};
use super::tween::RotationTween;
use crate::engine::assets::viewer_config::ViewerConfig;
use constants::door::{DOOR_CLOSED_ANGLE, LEFT_DOOR_OPEN_ANGLE, RIGHT_DOOR_OPEN_ANGLE};

/// Swing angle for a door state: left opens to -90°, right to +90°,
/// closed is always 0°.
pub fn door_target_angle(side: DoorSide, open: bool) -> f32 {
    match (side, open) {
        (DoorSide::Left, true) => LEFT_DOOR_OPEN_ANGLE,
        (DoorSide::Right, true) => RIGHT_DOOR_OPEN_ANGLE,
        (_, false) => DOOR_CLOSED_ANGLE,
    }
}

/// Where a toggle request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleSource {
    Pointer,
    Rpc,
}

/// Request to flip one door.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorToggleRequest {
    pub side: DoorSide,
    pub source: ToggleSource,
}

/// Emitted after a door changed state and its swing was started.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DoorToggledEvent {
    pub side: DoorSide,
    pub open: bool,
    pub target_angle: f32,
    pub duration: f32,
}

/// Applies toggle requests: flips the state bit and (re)starts the swing
/// from wherever the door currently is.
pub fn apply_door_toggles(
    mut requests: EventReader<DoorToggleRequest>,
    mut session: ResMut<ViewerSession>,
    config: Res<ViewerConfig>,
    doors: Query<&DoorNode>,
    mut commands: Commands,
    mut toggled: EventWriter<DoorToggledEvent>,
) {
    for request in requests.read() {
        let Some((binding, open, handle)) = session.toggle(request.side) else {
            debug!("Ignoring toggle of unbound {} door", request.side);
            continue;
        };
        let Ok(door) = doors.get(binding.door) else {
            warn!("{} door entity {:?} has no DoorNode", request.side, binding.door);
            continue;
        };

        let target_angle = door_target_angle(request.side, open);
        commands.entity(binding.door).insert(RotationTween::new(
            handle,
            request.side,
            door.angle,
            target_angle,
            config.swing_seconds,
        ));

        info!(
            "{} door {} via {:?} (target {:.0}°)",
            request.side,
            if open { "opening" } else { "closing" },
            request.source,
            target_angle.to_degrees()
        );
        toggled.write(DoorToggledEvent {
            side: request.side,
            open,
            target_angle,
            duration: config.swing_seconds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::session::DoorBinding;
    use crate::interaction::tween::advance_rotation_tweens;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn target_angle_table() {
        assert_relative_eq!(door_target_angle(DoorSide::Left, true), -FRAC_PI_2);
        assert_relative_eq!(door_target_angle(DoorSide::Left, false), 0.0);
        assert_relative_eq!(door_target_angle(DoorSide::Right, true), FRAC_PI_2);
        assert_relative_eq!(door_target_angle(DoorSide::Right, false), 0.0);
    }

    fn door_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ViewerSession>()
            .init_resource::<ViewerConfig>()
            .add_event::<DoorToggleRequest>()
            .add_event::<DoorToggledEvent>()
            .add_systems(Update, (apply_door_toggles, advance_rotation_tweens).chain());

        let transform = Transform::default();
        let door = app
            .world_mut()
            .spawn((transform, DoorNode::from_transform(DoorSide::Left, &transform)))
            .id();
        let marker = app.world_mut().spawn_empty().id();
        app.world_mut()
            .resource_mut::<ViewerSession>()
            .bind(Some(DoorBinding { door, marker }), None);
        (app, door)
    }

    fn toggled_events(app: &mut App) -> Vec<DoorToggledEvent> {
        app.world_mut()
            .resource_mut::<Events<DoorToggledEvent>>()
            .drain()
            .collect()
    }

    fn click(app: &mut App, side: DoorSide) {
        app.world_mut().send_event(DoorToggleRequest {
            side,
            source: ToggleSource::Pointer,
        });
        app.update();
    }

    #[test]
    fn left_door_click_opens_then_closes() {
        let (mut app, door) = door_app();

        click(&mut app, DoorSide::Left);
        assert!(app.world().resource::<ViewerSession>().door_states().left);
        let tween = app.world().get::<RotationTween>(door).copied().unwrap();
        assert_relative_eq!(tween.to, -FRAC_PI_2);
        assert_relative_eq!(tween.duration, 0.5);
        let events = toggled_events(&mut app);
        assert_eq!(events.len(), 1);
        assert!(events[0].open);

        click(&mut app, DoorSide::Left);
        assert!(!app.world().resource::<ViewerSession>().door_states().left);
        let tween = app.world().get::<RotationTween>(door).copied().unwrap();
        assert_relative_eq!(tween.to, 0.0);
        assert_eq!(toggled_events(&mut app)[0].target_angle, 0.0);
    }

    #[test]
    fn unbound_side_is_a_no_op() {
        let (mut app, _) = door_app();
        click(&mut app, DoorSide::Right);
        assert_eq!(
            app.world().resource::<ViewerSession>().door_states(),
            Default::default()
        );
        assert!(toggled_events(&mut app).is_empty());
    }

    #[test]
    fn retarget_starts_from_current_angle() {
        let (mut app, door) = door_app();
        click(&mut app, DoorSide::Left);

        // Pretend the swing is halfway through.
        app.world_mut().get_mut::<DoorNode>(door).unwrap().angle = -0.6;
        click(&mut app, DoorSide::Left);

        let tween = app.world().get::<RotationTween>(door).copied().unwrap();
        assert_relative_eq!(tween.from, -0.6);
        assert_relative_eq!(tween.to, 0.0);
        let session = app.world().resource::<ViewerSession>();
        assert_eq!(session.active_tween(DoorSide::Left), Some(tween.handle));
    }
}

use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy::render::camera::CameraProjection;
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use super::doors::{DoorToggleRequest, ToggleSource};
use super::ray::{PointerRay, pointer_to_ndc, ray_hits_obb, ray_sphere_hit_t, unproject};
use super::session::ViewerSession;
use super::state::{DoorMarker, DoorSide, PickableTarget, TargetRole};
use constants::camera::CLICK_DRAG_TOLERANCE_PX;

/// Shape tested for one pickable target.
#[derive(Debug, Clone, Copy)]
pub enum HitVolume {
    Sphere { center: Vec3, radius: f32 },
    Obb {
        world_from_local: Mat4,
        center: Vec3,
        half_extents: Vec3,
    },
}

impl HitVolume {
    pub fn intersect(&self, ray: &PointerRay) -> Option<f32> {
        match *self {
            Self::Sphere { center, radius } => ray_sphere_hit_t(ray, center, radius),
            Self::Obb {
                world_from_local,
                center,
                half_extents,
            } => ray_hits_obb(ray, world_from_local, center, half_extents),
        }
    }
}

/// A target paired with the volume it is tested against. A door made of
/// several meshes contributes one candidate per mesh.
#[derive(Debug, Clone, Copy)]
pub struct PickCandidate {
    pub target: PickableTarget,
    pub volume: HitVolume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: PickableTarget,
    pub distance: f32,
}

/// Hits from the winning candidate set, nearest first. Empty means the
/// click landed on nothing, which is not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickResult {
    pub hits: Vec<PickHit>,
}

impl PickResult {
    pub fn nearest(&self) -> Option<&PickHit> {
        self.hits.first()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn outcome(&self) -> PickOutcome {
        match self.nearest().map(|hit| hit.target.role) {
            Some(TargetRole::Marker(side)) => PickOutcome::Marker(side),
            Some(TargetRole::Door(side)) => PickOutcome::Door(side),
            None => PickOutcome::Nothing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Marker(DoorSide),
    Door(DoorSide),
    Nothing,
}

/// Test `ray` against markers, then doors. Doors are only tested when no
/// marker is hit.
pub fn pick(ray: &PointerRay, candidates: &[PickCandidate]) -> PickResult {
    let markers = intersect_set(ray, candidates.iter().filter(|c| c.target.role.is_marker()));
    if !markers.is_empty() {
        return PickResult { hits: markers };
    }
    let doors = intersect_set(ray, candidates.iter().filter(|c| !c.target.role.is_marker()));
    PickResult { hits: doors }
}

fn intersect_set<'a>(
    ray: &PointerRay,
    candidates: impl Iterator<Item = &'a PickCandidate>,
) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = candidates
        .filter_map(|c| {
            c.volume.intersect(ray).map(|distance| PickHit {
                target: c.target,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Full picker contract: pixel position in, pick result out.
pub fn pick_from_pointer(
    pointer: Vec2,
    viewport: Vec2,
    clip_from_view: Mat4,
    world_from_view: Mat4,
    candidates: &[PickCandidate],
) -> PickResult {
    let Some(ndc) = pointer_to_ndc(pointer, viewport) else {
        return PickResult::default();
    };
    let Some(ray) = unproject(ndc, clip_from_view, world_from_view) else {
        return PickResult::default();
    };
    pick(&ray, candidates)
}

/// Confirmed hit on a door marker. Informational only.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPickedEvent {
    pub side: DoorSide,
    pub entity: Entity,
}

/// What a confirmed click turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Marker(MarkerPickedEvent),
    Door(DoorToggleRequest),
}

/// Route the nearest hit. Marker hits never toggle a door.
pub fn route_pick(result: &PickResult) -> Option<ClickAction> {
    let target = result.nearest()?.target;
    Some(match target.role {
        TargetRole::Marker(side) => ClickAction::Marker(MarkerPickedEvent {
            side,
            entity: target.entity,
        }),
        TargetRole::Door(side) => ClickAction::Door(DoorToggleRequest {
            side,
            source: ToggleSource::Pointer,
        }),
    })
}

/// Tracks a left-button press so its release can be classified as a click
/// or the end of an orbit drag.
#[derive(Resource, Default)]
pub struct PointerGesture {
    press_position: Option<Vec2>,
}

impl PointerGesture {
    pub fn press(&mut self, position: Vec2) {
        self.press_position = Some(position);
    }

    /// Returns the release position if the gesture counts as a click.
    pub fn release(&mut self, position: Vec2) -> Option<Vec2> {
        let start = self.press_position.take()?;
        (start.distance(position) <= CLICK_DRAG_TOLERANCE_PX).then_some(position)
    }
}

/// Collect the current world-space hit volumes of every registered target.
pub fn collect_candidates(
    session: &ViewerSession,
    markers: &Query<(&GlobalTransform, &DoorMarker)>,
    meshes: &Query<(&GlobalTransform, &Aabb), Without<DoorMarker>>,
    children: &Query<&Children>,
) -> Vec<PickCandidate> {
    let mut candidates = Vec::new();
    for target in session.targets() {
        match target.role {
            TargetRole::Marker(_) => {
                let Ok((xf, marker)) = markers.get(target.entity) else {
                    continue;
                };
                let scale = xf.compute_transform().scale.max_element();
                candidates.push(PickCandidate {
                    target: *target,
                    volume: HitVolume::Sphere {
                        center: xf.translation(),
                        radius: marker.radius * scale,
                    },
                });
            }
            TargetRole::Door(_) => {
                let door_meshes = std::iter::once(target.entity)
                    .chain(children.iter_descendants(target.entity));
                for entity in door_meshes {
                    let Ok((xf, aabb)) = meshes.get(entity) else {
                        continue;
                    };
                    candidates.push(PickCandidate {
                        target: *target,
                        volume: HitVolume::Obb {
                            world_from_local: xf.compute_matrix(),
                            center: Vec3::from(aabb.center),
                            half_extents: Vec3::from(aabb.half_extents),
                        },
                    });
                }
            }
        }
    }
    candidates
}

/// Turns left clicks inside the viewport into marker/door events.
pub fn handle_pointer_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Projection), With<Camera3d>>,
    mut gesture: ResMut<PointerGesture>,
    session: Res<ViewerSession>,
    markers: Query<(&GlobalTransform, &DoorMarker)>,
    meshes: Query<(&GlobalTransform, &Aabb), Without<DoorMarker>>,
    children: Query<&Children>,
    mut door_hits: EventWriter<DoorToggleRequest>,
    mut marker_picks: EventWriter<MarkerPickedEvent>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        gesture.press(cursor_pos);
    }
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    let Some(click_pos) = gesture.release(cursor_pos) else {
        return;
    };

    // Nothing bound yet: the model is still loading or has no doors.
    if session.targets().is_empty() {
        return;
    }

    let Ok((cam_xf, projection)) = cameras.single() else {
        return;
    };

    let candidates = collect_candidates(&session, &markers, &meshes, &children);
    let result = pick_from_pointer(
        click_pos,
        Vec2::new(window.width(), window.height()),
        projection.get_clip_from_view(),
        cam_xf.compute_matrix(),
        &candidates,
    );

    match route_pick(&result) {
        Some(ClickAction::Marker(picked)) => {
            info!("Marker picked: {} door ({:?})", picked.side, picked.entity);
            marker_picks.write(picked);
        }
        Some(ClickAction::Door(request)) => {
            door_hits.write(request);
        }
        None => {}
    }
}

use bevy::prelude::*;
use bevy::scene::{SceneInstance, SceneSpawner};

use super::session::{DoorBinding, ViewerSession};
use super::state::{DoorMarker, DoorNode, DoorSide, ModelRoot};
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::error::ViewerError;
use constants::door::MARKER_RESOLUTION;

/// Mesh and material shared by both door markers.
#[derive(Resource, Clone, Default)]
pub struct MarkerAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Ask for the doors under `root` to be bound.
#[derive(Event, Debug, Clone, Copy)]
pub struct BindDoorsRequest {
    pub root: Entity,
}

/// Result of binding, one flag per side.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorsBoundEvent {
    pub left: bool,
    pub right: bool,
}

/// Tags a model root whose binding has already been requested.
#[derive(Component)]
pub struct BindingRequested;

/// Find the door nodes among named scene nodes. The first node carrying a
/// configured name wins.
pub fn resolve_door_nodes<'a>(
    config: &ViewerConfig,
    nodes: impl IntoIterator<Item = (Entity, &'a str)>,
) -> (Option<Entity>, Option<Entity>) {
    let mut left = None;
    let mut right = None;
    for (entity, name) in nodes {
        if left.is_none() && name == config.door_node_name(DoorSide::Left) {
            left = Some(entity);
        } else if right.is_none() && name == config.door_node_name(DoorSide::Right) {
            right = Some(entity);
        }
    }
    (left, right)
}

pub fn create_marker_assets(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (sectors, stacks) = MARKER_RESOLUTION;
    let mesh = meshes.add(Sphere::new(config.marker.radius).mesh().uv(sectors, stacks));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    commands.insert_resource(MarkerAssets { mesh, material });
}

/// Waits for the glTF scene under a `ModelRoot` to finish spawning, then
/// requests binding once.
pub fn request_binding_when_scene_ready(
    mut commands: Commands,
    scene_spawner: Res<SceneSpawner>,
    roots: Query<(Entity, &SceneInstance), (With<ModelRoot>, Without<BindingRequested>)>,
    mut requests: EventWriter<BindDoorsRequest>,
) {
    for (root, instance) in &roots {
        if scene_spawner.instance_is_ready(**instance) {
            commands.entity(root).insert(BindingRequested);
            requests.write(BindDoorsRequest { root });
        }
    }
}

/// Resolves both doors, attaches a marker sphere to each and fills the
/// session registry.
pub fn bind_doors(
    mut requests: EventReader<BindDoorsRequest>,
    mut commands: Commands,
    children: Query<&Children>,
    names: Query<&Name>,
    transforms: Query<&Transform>,
    config: Res<ViewerConfig>,
    marker_assets: Res<MarkerAssets>,
    mut session: ResMut<ViewerSession>,
    mut bound: EventWriter<DoorsBoundEvent>,
) {
    for request in requests.read() {
        if session.is_bound() {
            warn!("Model already bound, ignoring binding of {:?}", request.root);
            continue;
        }

        let named = children
            .iter_descendants(request.root)
            .filter_map(|entity| names.get(entity).ok().map(|name| (entity, name.as_str())));
        let (left, right) = resolve_door_nodes(&config, named);

        let mut bind_side = |side: DoorSide, door: Option<Entity>| -> Option<DoorBinding> {
            let Some(door) = door else {
                warn!(
                    "{}",
                    ViewerError::MissingDoorNode {
                        side,
                        name: config.door_node_name(side).to_string(),
                    }
                );
                return None;
            };

            let transform = transforms.get(door).copied().unwrap_or_default();
            let marker = commands
                .spawn((
                    Name::new(format!("{side}DoorMarker")),
                    Mesh3d(marker_assets.mesh.clone()),
                    MeshMaterial3d(marker_assets.material.clone()),
                    Transform::from_translation(config.marker_offset()),
                    DoorMarker {
                        side,
                        radius: config.marker.radius,
                    },
                ))
                .id();
            commands
                .entity(door)
                .insert(DoorNode::from_transform(side, &transform))
                .add_child(marker);
            Some(DoorBinding { door, marker })
        };

        let left = bind_side(DoorSide::Left, left);
        let right = bind_side(DoorSide::Right, right);
        session.bind(left, right);

        info!(
            "Doors bound: left={} right={}",
            left.is_some(),
            right.is_some()
        );
        bound.write(DoorsBoundEvent {
            left: left.is_some(),
            right: right.is_some(),
        });
    }
}

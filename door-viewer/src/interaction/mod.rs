//! Door interaction layer for the loaded model.
//!
//! Binds the two named door nodes once the glTF scene has spawned, turns
//! pointer clicks into picks against markers and doors, flips per-door
//! open/closed state and drives the resulting swing animation.
//!
//! ## Frame order
//!
//! ```text
//! scene ready ─> bind_doors ─> ViewerSession (targets)
//!                                   │
//! left click ─> handle_pointer_click ─> DoorToggleRequest ─> apply_door_toggles
//!                    │                        ▲                     │
//!                    └─> MarkerPickedEvent    │ (RPC toggle_door)   └─> RotationTween
//!                                             │                            │
//!                                         web_rpc              advance_rotation_tweens
//! ```
//!
//! Everything that makes a decision (picking priority, target angles, easing,
//! aspect ratio) is a plain function so it can be tested without a window.

use bevy::prelude::*;

/// Scene binding: door node lookup and marker attachment.
pub mod binding;

/// Door state machine and toggle events.
pub mod doors;

/// Pointer picking against markers and door meshes.
pub mod picking;

/// Pointer ray maths.
pub mod ray;

/// Per-viewer interaction state.
pub mod session;

/// Door sides, target roles, open/closed bits and door components.
pub mod state;

/// Door swing animation.
pub mod tween;

/// Resize handling for camera aspect and surface size.
pub mod viewport;

use binding::{
    BindDoorsRequest, DoorsBoundEvent, MarkerAssets, bind_doors, request_binding_when_scene_ready,
};
use doors::{DoorToggleRequest, DoorToggledEvent, apply_door_toggles};
use picking::{MarkerPickedEvent, PointerGesture, handle_pointer_click};
use session::ViewerSession;
use tween::advance_rotation_tweens;
use viewport::sync_viewport_on_resize;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerSession>()
            .init_resource::<PointerGesture>()
            .init_resource::<MarkerAssets>()
            .add_event::<BindDoorsRequest>()
            .add_event::<DoorsBoundEvent>()
            .add_event::<DoorToggleRequest>()
            .add_event::<DoorToggledEvent>()
            .add_event::<MarkerPickedEvent>()
            .add_systems(
                Update,
                (
                    (request_binding_when_scene_ready, bind_doors).chain(),
                    (
                        handle_pointer_click,
                        apply_door_toggles,
                        advance_rotation_tweens,
                    )
                        .chain(),
                    sync_viewport_on_resize,
                ),
            );
    }
}

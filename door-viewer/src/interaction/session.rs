use bevy::prelude::*;

use super::state::{DoorSide, DoorStates, PickableTarget, TargetRole};
use super::tween::TweenHandle;

/// Entities bound to one door side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorBinding {
    pub door: Entity,
    pub marker: Entity,
}

/// All mutable interaction state of one viewer instance.
#[derive(Resource, Debug, Default)]
pub struct ViewerSession {
    doors: DoorStates,
    left: Option<DoorBinding>,
    right: Option<DoorBinding>,
    targets: Vec<PickableTarget>,
    left_tween: Option<TweenHandle>,
    right_tween: Option<TweenHandle>,
    next_tween: u64,
    bound: bool,
}

impl ViewerSession {
    pub fn door_states(&self) -> DoorStates {
        self.doors
    }

    pub fn targets(&self) -> &[PickableTarget] {
        &self.targets
    }

    pub fn binding(&self, side: DoorSide) -> Option<DoorBinding> {
        match side {
            DoorSide::Left => self.left,
            DoorSide::Right => self.right,
        }
    }

    /// Whether a model has been bound, even if it had no doors.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Record the result of scene binding. Markers are registered ahead of
    /// doors; picking filters by role so the order is informational.
    pub fn bind(&mut self, left: Option<DoorBinding>, right: Option<DoorBinding>) {
        self.left = left;
        self.right = right;
        self.targets.clear();
        for (side, binding) in [(DoorSide::Left, left), (DoorSide::Right, right)] {
            if let Some(b) = binding {
                self.targets.push(PickableTarget {
                    entity: b.marker,
                    role: TargetRole::Marker(side),
                });
            }
        }
        for (side, binding) in [(DoorSide::Left, left), (DoorSide::Right, right)] {
            if let Some(b) = binding {
                self.targets.push(PickableTarget {
                    entity: b.door,
                    role: TargetRole::Door(side),
                });
            }
        }
        self.bound = true;
    }

    /// Flip the door bit and hand out a fresh tween handle, superseding the
    /// one in flight for that side. Returns `None` for an unbound side.
    pub fn toggle(&mut self, side: DoorSide) -> Option<(DoorBinding, bool, TweenHandle)> {
        let binding = self.binding(side)?;
        let open = self.doors.toggle(side);
        self.next_tween += 1;
        let handle = TweenHandle(self.next_tween);
        let slot = self.tween_slot(side);
        if let Some(previous) = slot.replace(handle) {
            debug!("{} door tween {:?} superseded by {:?}", side, previous, handle);
        }
        Some((binding, open, handle))
    }

    pub fn active_tween(&self, side: DoorSide) -> Option<TweenHandle> {
        match side {
            DoorSide::Left => self.left_tween,
            DoorSide::Right => self.right_tween,
        }
    }

    /// Clear the active handle if it is still `handle`.
    pub fn finish_tween(&mut self, side: DoorSide, handle: TweenHandle) {
        let slot = self.tween_slot(side);
        if *slot == Some(handle) {
            *slot = None;
        }
    }

    fn tween_slot(&mut self, side: DoorSide) -> &mut Option<TweenHandle> {
        match side {
            DoorSide::Left => &mut self.left_tween,
            DoorSide::Right => &mut self.right_tween,
        }
    }
}

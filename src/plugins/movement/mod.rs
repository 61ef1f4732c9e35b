//! Movement: project intent onto velocity, one axis per component.
//!
//! `HorizontalMovement` and `VerticalMovement` are independently attachable;
//! a ship with both has full 2-D control, a fighter carries only the vertical
//! one. Each system writes exactly its own axis of `LinearVelocity`, so the
//! two never fight over the vector.
//!
//! These are pure per-frame projections: no internal state beyond the
//! configured speed, and contradictory intent (both flags set) resolves to a
//! standstill on that axis.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::colliders::LifeState;
use crate::plugins::input::{self, Intent};

/// Drive the X axis of `LinearVelocity` from `Intent::left` / `Intent::right`.
#[derive(Component, Debug, Clone, Copy)]
pub struct HorizontalMovement {
    pub speed: f32,
}

/// Drive the Y axis of `LinearVelocity` from `Intent::up` / `Intent::down`.
#[derive(Component, Debug, Clone, Copy)]
pub struct VerticalMovement {
    pub speed: f32,
}

pub fn plugin(app: &mut App) {
    // Intent first, then movement: both axes read this frame's signal.
    app.add_systems(
        FixedUpdate,
        (apply_horizontal, apply_vertical)
            .after(input::scout_steer)
            .run_if(in_state(GameState::InGame)),
    );
}

#[inline]
fn axis(negative: bool, positive: bool, speed: f32) -> f32 {
    match (negative, positive) {
        (true, false) => -speed,
        (false, true) => speed,
        // Neither or both: hold still on this axis.
        _ => 0.0,
    }
}

pub fn apply_horizontal(
    mut q: Query<(&Intent, &HorizontalMovement, &LifeState, &mut LinearVelocity)>,
) {
    for (intent, movement, life, mut vel) in &mut q {
        if !life.is_active() {
            continue;
        }
        vel.x = axis(intent.left, intent.right, movement.speed);
    }
}

pub fn apply_vertical(
    mut q: Query<(&Intent, &VerticalMovement, &LifeState, &mut LinearVelocity)>,
) {
    for (intent, movement, life, mut vel) in &mut q {
        if !life.is_active() {
            continue;
        }
        vel.y = axis(intent.down, intent.up, movement.speed);
    }
}

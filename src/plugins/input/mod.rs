//! Intent production.
//!
//! `Intent` is the per-frame signal every other behavior consumes: movement
//! reads the directional pairs, weapons read `shoot`. Who *writes* it varies:
//!
//! - the player: keyboard sampling in `plugins::player` (Update schedule);
//! - the fighter bot: a constant intent stamped at activation, no per-frame
//!   work at all;
//! - the scout bot: `scout_steer` below, which bounces the ship between the
//!   edges of a vertical band anchored at its spawn height.
//!
//! Consumers never write `Intent`; within one fixed tick, intent systems run
//! before movement and weapon systems so both see the current frame's signal.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::colliders::LifeState;

/// Directional + fire intent for one ship, rewritten every frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl Intent {
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
        shoot: false,
    };

    /// Fighter bot intent: dive at the player and never stop shooting.
    /// Constant for the whole life, so fighters need no steering system.
    pub const fn fighter() -> Self {
        Self {
            down: true,
            shoot: true,
            up: false,
            left: false,
            right: false,
        }
    }

    /// Scout bot intent at activation: drift toward the far side of the
    /// field while climbing. `scout_steer` flips the vertical pair from here.
    pub const fn scout_initial() -> Self {
        Self {
            up: true,
            left: true,
            down: false,
            right: false,
            shoot: false,
        }
    }
}

/// Scout AI state: the vertical band the ship oscillates in.
///
/// `start_y` anchors the band at the ship's spawn height. Pooled scouts are
/// reused at new coordinates, so the spawner re-baselines this on every
/// respawn; a stale anchor would send the ship chasing its previous life.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScoutBrain {
    pub start_y: f32,
    pub max_y: f32,
}

impl ScoutBrain {
    pub fn new(max_y: f32) -> Self {
        Self { start_y: 0.0, max_y }
    }

    /// Re-anchor the band at a new spawn height.
    pub fn rebase(&mut self, y: f32) {
        self.start_y = y;
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        scout_steer.run_if(in_state(GameState::InGame)),
    );
}

/// Flip a scout's vertical intent when it leaves its band.
///
/// Both flags are always written together; an intent can never claim up and
/// down at once. Inside the band the current heading is kept, which is what
/// produces the back-and-forth drift instead of jitter at the band center.
pub fn scout_steer(mut q: Query<(&Transform, &ScoutBrain, &LifeState, &mut Intent)>) {
    for (tf, brain, life, mut intent) in &mut q {
        if !life.is_active() {
            continue;
        }

        let y = tf.translation.y;
        if y > brain.start_y + brain.max_y {
            // Above the band: head back down.
            intent.up = false;
            intent.down = true;
        } else if y < brain.start_y - brain.max_y {
            // Below the band: head back up.
            intent.up = true;
            intent.down = false;
        }
    }
}

//! Weapons: cooldown-gated firing from a fixed per-weapon bullet pool.
//!
//! # Data flow
//! ```text
//! FixedUpdate
//! ┌──────────────────────────────────────────────────────────────┐
//! │ (A) init_weapon_pools                                        │
//! │     - pre-spawns `capacity` inactive bullets per new Weapon  │
//! │                                                              │
//! │ (B) fire_weapons            (after movement systems)         │
//! │     - reads: Intent.shoot, ship Transform, LifeState         │
//! │     - pops Weapon.free, activates the bullet at the muzzle   │
//! │                                                              │
//! │ (C) bullet_lifespan                                          │
//! │     - ticks BulletLife, retires expired bullets              │
//! └──────────────────────────────────────────────────────────────┘
//! FixedPostUpdate
//! ┌──────────────────────────────────────────────────────────────┐
//! │ (D) colliders::process_bullet_hits retires hit bullets       │
//! │ (E) return_to_pool_commit                                    │
//! │     - writes the Inactive invariants                         │
//! │     - pushes the bullet back into its owner's free list      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The feedback loop (commit pushes, fire pops) means steady-state play
//! allocates nothing: "spawn" and "destroy" are component writes.

pub mod components;
pub mod fire;
pub mod pool;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::{colliders, movement};

pub use components::{BulletKind, Weapon};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            pool::init_weapon_pools,
            fire::fire_weapons
                .after(movement::apply_horizontal)
                .after(movement::apply_vertical),
            pool::bullet_lifespan,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        pool::return_to_pool_commit
            .after(colliders::process_bullet_hits)
            .run_if(in_state(GameState::InGame)),
    );
}

#[cfg(test)]
mod tests;

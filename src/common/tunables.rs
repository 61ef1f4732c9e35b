//! Tunable gameplay constants.
//!
//! Everything that shapes gameplay feel lives here so it can be tweaked in one
//! place (and overridden wholesale in tests).

use bevy::prelude::*;

/// One weapon archetype: how fast it fires, how its bullets fly and expire.
#[derive(Debug, Clone, Copy)]
pub struct WeaponTuning {
    /// Bullet speed along the fire axis, world units per second.
    pub projectile_speed: f32,
    /// Minimum seconds between shots.
    pub fire_interval: f32,
    /// Seconds a bullet lives before it expires on its own.
    pub lifespan: f32,
    /// Fixed bullet pool size. Firing with a saturated pool drops the shot.
    pub capacity: usize,
    /// Signed Y offset from the ship's position where bullets appear.
    pub spawn_offset: f32,
    /// Fire downward (-Y) instead of upward (+Y).
    pub flip_y: bool,
}

/// One enemy spawner: pool size plus the spawn schedule.
#[derive(Debug, Clone, Copy)]
pub struct SpawnerTuning {
    /// Fixed enemy pool size for this variant.
    pub capacity: usize,
    /// Seconds after scene start before the first spawn attempt.
    pub initial_delay: f32,
    /// Seconds between spawn attempts once running.
    pub interval: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,

    /// Half extents of the play field. Ships spawn just above `field_half.y`
    /// and are culled once they fall below `-field_half.y`.
    pub field_half: Vec2,

    pub player_speed: f32,
    pub player_hp: i32,
    pub player_weapon: WeaponTuning,

    pub fighter_speed: f32,
    pub fighter_hp: i32,
    pub fighter_score: u32,
    pub fighter_weapon: WeaponTuning,
    pub fighter_spawner: SpawnerTuning,

    pub scout_speed_x: f32,
    pub scout_speed_y: f32,
    /// How far a scout drifts from its spawn height before turning around.
    pub scout_max_y: f32,
    pub scout_hp: i32,
    pub scout_score: u32,
    pub scout_spawner: SpawnerTuning,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            field_half: Vec2::new(220.0, 320.0),

            player_speed: 200.0,
            player_hp: 4,
            player_weapon: WeaponTuning {
                projectile_speed: 600.0,
                fire_interval: 0.25,
                lifespan: 1.0,
                capacity: 10,
                spawn_offset: 20.0,
                flip_y: false,
            },

            fighter_speed: 70.0,
            fighter_hp: 2,
            fighter_score: 25,
            fighter_weapon: WeaponTuning {
                projectile_speed: 300.0,
                fire_interval: 1.0,
                lifespan: 2.0,
                capacity: 6,
                spawn_offset: -16.0,
                flip_y: true,
            },
            fighter_spawner: SpawnerTuning {
                capacity: 4,
                initial_delay: 3.0,
                interval: 2.5,
            },

            scout_speed_x: 60.0,
            scout_speed_y: 50.0,
            scout_max_y: 32.0,
            scout_hp: 1,
            scout_score: 10,
            scout_spawner: SpawnerTuning {
                capacity: 6,
                initial_delay: 1.0,
                interval: 1.5,
            },
        }
    }
}

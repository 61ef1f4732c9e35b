//! Bullet pooling: pre-spawn, self-expiry, return commit.
//!
//! Invariant: an inactive bullet is hidden, stationary, and collides with
//! nothing (empty collision filters, membership kept). Only component values
//! ever change; bullets never move between archetypes after pre-spawn.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

use super::components::{BulletKind, BulletLife, BulletState, PooledBullet, Weapon};

pub fn active_bullet_layers(kind: BulletKind) -> CollisionLayers {
    match kind {
        BulletKind::Player => CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy]),
        BulletKind::Enemy => CollisionLayers::new(Layer::EnemyBullet, [Layer::Player]),
    }
}

/// "Disabled" without structural changes: empty filters means the bullet
/// collides with nothing and generates no collision events.
pub fn inactive_bullet_layers(kind: BulletKind) -> CollisionLayers {
    match kind {
        BulletKind::Player => CollisionLayers::new(Layer::PlayerBullet, [] as [Layer; 0]),
        BulletKind::Enemy => CollisionLayers::new(Layer::EnemyBullet, [] as [Layer; 0]),
    }
}

fn bullet_color(kind: BulletKind) -> Color {
    match kind {
        BulletKind::Player => Color::srgb(1.0, 0.85, 0.3),
        BulletKind::Enemy => Color::srgb(1.0, 0.35, 0.35),
    }
}

/// Pre-spawn the pool for every weapon that appeared since the last run.
///
/// Runs before the fire system each fixed tick, so a weapon attached in
/// frame N can fire in frame N at the earliest — never before its pool
/// exists.
pub fn init_weapon_pools(
    mut commands: Commands,
    mut q_new: Query<(Entity, &mut Weapon), Added<Weapon>>,
) {
    for (owner, mut weapon) in &mut q_new {
        for _ in 0..weapon.tuning.capacity {
            let e = commands
                .spawn((
                    Name::new("Bullet(Pooled)"),
                    PooledBullet { weapon: owner },
                    BulletState::Inactive,
                    BulletLife(Timer::from_seconds(weapon.tuning.lifespan, TimerMode::Once)),
                    Sprite {
                        color: bullet_color(weapon.kind),
                        custom_size: Some(Vec2::splat(6.0)),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 2.0),
                    Visibility::Hidden,
                    RigidBody::Kinematic,
                    Collider::circle(3.0),
                    Sensor,
                    inactive_bullet_layers(weapon.kind),
                    LinearVelocity(Vec2::ZERO),
                    // Opt in to CollisionStart messages for every bullet pair.
                    CollisionEventsEnabled,
                    DespawnOnExit(GameState::InGame),
                ))
                .id();

            weapon.push_free(e);
        }
    }
}

/// Expire active bullets whose lifespan ran out.
///
/// Independent of firing and collisions: a bullet that hits nothing still
/// leaves play at most one tick after `lifespan` elapses.
pub fn bullet_lifespan(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut BulletState, &mut BulletLife)>,
) {
    for (mut state, mut life) in &mut q {
        if *state != BulletState::Active {
            continue;
        }
        life.tick(time.delta());
        if life.is_finished() {
            state.retire();
        }
    }
}

/// Recycle retired bullets into their owning weapon's free list.
///
/// Single writer of the inactive invariants (hidden, stationary, filters
/// empty); collision and lifespan systems only ever mark `PendingReturn`.
pub fn return_to_pool_commit(
    mut q_bullets: Query<(
        Entity,
        &PooledBullet,
        &mut BulletState,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    )>,
    mut q_weapons: Query<&mut Weapon>,
) {
    for (e, pooled, mut state, mut vis, mut vel, mut layers) in &mut q_bullets {
        if *state != BulletState::PendingReturn {
            continue;
        }

        *state = BulletState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;

        // The owning weapon can be gone during scene teardown; the orphan is
        // parked and despawned with the rest of the scene.
        let Ok(mut weapon) = q_weapons.get_mut(pooled.weapon) else {
            layers.filters = LayerMask::NONE;
            continue;
        };

        *layers = inactive_bullet_layers(weapon.kind);
        weapon.push_free(e);
    }
}

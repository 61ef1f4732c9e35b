//! Damage and death rules, driven by externally-detected overlaps.
//!
//! Avian's narrow phase is the overlap collaborator: it writes
//! `CollisionStart` messages in `FixedPostUpdate`, strictly after movement
//! has been applied. The two systems here classify each overlap by the
//! entities involved and dispatch the matching reaction:
//!
//! - ship touches ship (`process_ship_contacts`): lethal for both sides;
//! - projectile touches ship (`process_bullet_hits`): the bullet is consumed
//!   and the ship loses one hit point.
//!
//! Guard invariant: a reaction is never dispatched while either side is
//! already inactive. The check happens here, at the boundary, so the
//! reactions themselves stay straight-line.
//!
//! Lethal outcomes deactivate the ship *first* and then publish the
//! lifecycle event (`EnemyDestroyed` / `PlayerDamaged`); subscribers only do
//! bookkeeping, never the kill itself.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::EnemyVariant;
use crate::plugins::events::{EnemyDestroyed, PlayerDamaged};
use crate::plugins::player::Player;
use crate::plugins::weapons::components::{BulletState, PooledBullet};

/// The pooled-entity alive/parked flag.
///
/// Every per-frame behavior (steering, movement, weapons) skips ships that
/// are not `Active`; collision reactions additionally refuse to dispatch for
/// them. Flipping this flag *is* spawn/destroy — pooled ships are never
/// despawned during play.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Inactive,
    Active,
}

impl LifeState {
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub hp: i32,
}

impl Health {
    /// Ship-to-ship contact is always lethal.
    #[inline]
    pub fn ship_contact(&mut self) {
        self.hp = 0;
    }

    /// One projectile removes one hit point.
    #[inline]
    pub fn projectile_hit(&mut self) {
        self.hp = (self.hp - 1).max(0);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Park a ship: inactive, hidden, stationary, colliding with nothing.
///
/// Membership stays so the slot can be re-armed by restoring filters; only
/// component values change, never the archetype.
pub fn deactivate_ship(
    life: &mut LifeState,
    layers: &mut CollisionLayers,
    vel: &mut LinearVelocity,
    vis: &mut Visibility,
) {
    *life = LifeState::Inactive;
    layers.filters = LayerMask::NONE;
    vel.0 = Vec2::ZERO;
    *vis = Visibility::Hidden;
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        (process_ship_contacts, process_bullet_hits)
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Player ship overlapping an enemy ship: both are destroyed.
pub fn process_ship_contacts(
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    q_player: Query<(), With<Player>>,
    q_enemy: Query<&EnemyVariant>,
    mut q_ships: Query<
        (
            &mut LifeState,
            &mut Health,
            &mut CollisionLayers,
            &mut LinearVelocity,
            &mut Visibility,
        ),
        Without<PooledBullet>,
    >,
) {
    for ev in started.read() {
        let a = ev.collider1;
        let b = ev.collider2;

        let (player, enemy) = if q_player.contains(a) && q_enemy.contains(b) {
            (a, b)
        } else if q_player.contains(b) && q_enemy.contains(a) {
            (b, a)
        } else {
            continue;
        };

        // Stale-reference guard: both sides must still be active.
        let both_active = q_ships.get(player).is_ok_and(|(life, ..)| life.is_active())
            && q_ships.get(enemy).is_ok_and(|(life, ..)| life.is_active());
        if !both_active {
            continue;
        }

        {
            let (mut life, mut hp, mut layers, mut vel, mut vis) = q_ships
                .get_mut(enemy)
                .expect("enemy passed the active guard above");
            hp.ship_contact();
            deactivate_ship(&mut life, &mut layers, &mut vel, &mut vis);

            let variant = q_enemy.get(enemy).expect("matched q_enemy above");
            commands.trigger(EnemyDestroyed {
                enemy,
                score: variant.score(&tunables),
            });
        }

        {
            let (mut life, mut hp, mut layers, mut vel, mut vis) = q_ships
                .get_mut(player)
                .expect("player passed the active guard above");
            hp.ship_contact();
            deactivate_ship(&mut life, &mut layers, &mut vel, &mut vis);
            commands.trigger(PlayerDamaged { remaining: 0 });
        }
    }
}

/// Bullet overlapping a ship: consume the bullet, wound the ship.
///
/// The bullet side is returned to its weapon's pool via `BulletState` (the
/// commit system picks it up later this tick); the ship side reacts per its
/// owner: enemies publish `EnemyDestroyed` on death, the player publishes
/// `PlayerDamaged` on every hit.
pub fn process_bullet_hits(
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    q_is_bullet: Query<(), With<PooledBullet>>,
    mut q_bullet_state: Query<&mut BulletState, With<PooledBullet>>,
    q_player: Query<(), With<Player>>,
    q_enemy: Query<&EnemyVariant>,
    mut q_ships: Query<
        (
            &mut LifeState,
            &mut Health,
            &mut CollisionLayers,
            &mut LinearVelocity,
            &mut Visibility,
        ),
        Without<PooledBullet>,
    >,
    // Per-frame dedupe: one hit per bullet even if the narrow phase reports
    // several overlaps for it.
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let a = ev.collider1;
        let b = ev.collider2;

        let b1 = q_is_bullet.contains(a);
        let b2 = q_is_bullet.contains(b);
        if !(b1 ^ b2) {
            continue; // must be exactly one bullet
        }
        let (bullet, ship) = if b1 { (a, b) } else { (b, a) };

        if !seen.insert(bullet) {
            continue;
        }

        let Ok(mut state) = q_bullet_state.get_mut(bullet) else {
            continue;
        };
        if *state != BulletState::Active {
            continue;
        }

        // Guard the ship side before reacting.
        if !q_ships.get(ship).is_ok_and(|(life, ..)| life.is_active()) {
            continue;
        }

        // The hit consumes the bullet regardless of the outcome on the ship.
        state.retire();

        let (mut life, mut hp, mut layers, mut vel, mut vis) = q_ships
            .get_mut(ship)
            .expect("ship passed the active guard above");
        hp.projectile_hit();

        if let Ok(variant) = q_enemy.get(ship) {
            if hp.is_dead() {
                deactivate_ship(&mut life, &mut layers, &mut vel, &mut vis);
                commands.trigger(EnemyDestroyed {
                    enemy: ship,
                    score: variant.score(&tunables),
                });
            }
        } else if q_player.contains(ship) {
            if hp.is_dead() {
                deactivate_ship(&mut life, &mut layers, &mut vel, &mut vis);
            }
            commands.trigger(PlayerDamaged { remaining: hp.hp });
        }
    }
}

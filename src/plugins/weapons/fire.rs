//! The fire system: intent in, activated bullets out.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::plugins::colliders::LifeState;
use crate::plugins::input::Intent;

use super::components::{BulletLife, BulletState, PooledBullet, Weapon};
use super::pool::active_bullet_layers;

/// Fire every ready weapon whose owner wants to shoot.
///
/// Per weapon and tick, at most one bullet: the cooldown must have reached
/// `fire_interval` and resets to zero on firing. A saturated pool drops the
/// shot silently — that is the backpressure policy, not an error.
///
/// The two queries both touch `Transform`; disjointness is encoded with
/// `With`/`Without<PooledBullet>` filters (ships are never pool members).
pub fn fire_weapons(
    time: Res<Time<Fixed>>,
    mut q_ships: Query<
        (&Intent, &Transform, &LifeState, &mut Weapon),
        Without<PooledBullet>,
    >,
    mut q_bullets: Query<
        (
            &mut BulletState,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut CollisionLayers,
            &mut BulletLife,
        ),
        With<PooledBullet>,
    >,
) {
    let dt = time.delta_secs();

    for (intent, ship_tf, life, mut weapon) in &mut q_ships {
        if !life.is_active() {
            continue;
        }

        weapon.tick(dt);
        if !intent.shoot || !weapon.ready() {
            continue;
        }

        let Some(bullet) = weapon.pop_free() else {
            // Pool saturated: drop the shot, keep the cooldown running so the
            // next free slot can be used immediately.
            continue;
        };

        let (mut state, mut tf, mut vel, mut vis, mut layers, mut bullet_life) = q_bullets
            .get_mut(bullet)
            .expect("weapon free list contained an entity missing pooled bullet components");

        let dir = if weapon.tuning.flip_y { -1.0 } else { 1.0 };
        let muzzle = ship_tf.translation.truncate() + Vec2::new(0.0, weapon.tuning.spawn_offset);

        *state = BulletState::Active;
        tf.translation = muzzle.extend(2.0);
        vel.0 = Vec2::new(0.0, dir * weapon.tuning.projectile_speed);
        *vis = Visibility::Visible;
        *layers = active_bullet_layers(weapon.kind);
        bullet_life.reset();

        weapon.reset_cooldown();
    }
}

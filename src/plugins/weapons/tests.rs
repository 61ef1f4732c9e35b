use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::{run_system_once, set_fixed_delta};
use crate::common::tunables::WeaponTuning;
use crate::plugins::colliders::LifeState;
use crate::plugins::input::Intent;

use super::components::{BulletKind, BulletState, PooledBullet, Weapon};
use super::{fire, pool};

fn tuning(capacity: usize) -> WeaponTuning {
    WeaponTuning {
        projectile_speed: 500.0,
        fire_interval: 0.25,
        lifespan: 1.0,
        capacity,
        spawn_offset: 20.0,
        flip_y: false,
    }
}

fn spawn_armed_ship(world: &mut World, kind: BulletKind, tuning: WeaponTuning) -> Entity {
    world
        .spawn((
            Intent {
                shoot: true,
                ..Intent::NONE
            },
            Transform::from_xyz(10.0, -50.0, 1.0),
            LifeState::Active,
            Weapon::new(kind, tuning),
        ))
        .id()
}

fn active_bullets(world: &mut World) -> Vec<Entity> {
    world
        .query::<(Entity, &BulletState)>()
        .iter(world)
        .filter(|(_, s)| **s == BulletState::Active)
        .map(|(e, _)| e)
        .collect()
}

#[test]
fn init_spawns_capacity_inactive_bullets() {
    let mut world = World::new();
    let ship = spawn_armed_ship(&mut world, BulletKind::Player, tuning(8));

    run_system_once(&mut world, pool::init_weapon_pools);

    assert_eq!(world.get::<Weapon>(ship).unwrap().free_count(), 8);

    let mut q = world.query::<(&PooledBullet, &BulletState, &Visibility, &CollisionLayers)>();
    let mut count = 0;
    for (pooled, state, vis, layers) in q.iter(&world) {
        count += 1;
        assert_eq!(pooled.weapon, ship);
        assert_eq!(*state, BulletState::Inactive);
        assert_eq!(*vis, Visibility::Hidden);
        assert_eq!(layers.filters, LayerMask::NONE);
    }
    assert_eq!(count, 8);
}

#[test]
fn fires_one_bullet_once_interval_elapsed() {
    let mut world = World::new();
    let ship = spawn_armed_ship(&mut world, BulletKind::Player, tuning(8));
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 0.25);
    run_system_once(&mut world, fire::fire_weapons);

    let active = active_bullets(&mut world);
    assert_eq!(active.len(), 1);

    let bullet = active[0];
    let vel = world.get::<LinearVelocity>(bullet).unwrap();
    assert_eq!(vel.0, Vec2::new(0.0, 500.0));

    let tf = world.get::<Transform>(bullet).unwrap();
    assert_eq!(tf.translation.truncate(), Vec2::new(10.0, -30.0)); // muzzle offset applied

    assert_eq!(*world.get::<Visibility>(bullet).unwrap(), Visibility::Visible);
    assert_eq!(world.get::<Weapon>(ship).unwrap().free_count(), 7);
}

#[test]
fn never_more_than_one_bullet_per_interval_window() {
    let mut world = World::new();
    spawn_armed_ship(&mut world, BulletKind::Player, tuning(8));
    run_system_once(&mut world, pool::init_weapon_pools);

    // Ten ticks of 0.05s = 0.5s total: exactly two 0.25s windows.
    set_fixed_delta(&mut world, 0.05);
    for _ in 0..10 {
        run_system_once(&mut world, fire::fire_weapons);
    }

    assert_eq!(active_bullets(&mut world).len(), 2);
}

#[test]
fn saturated_pool_drops_the_shot() {
    let mut world = World::new();
    let ship = spawn_armed_ship(&mut world, BulletKind::Player, tuning(1));
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 0.3);
    run_system_once(&mut world, fire::fire_weapons);
    run_system_once(&mut world, fire::fire_weapons);
    run_system_once(&mut world, fire::fire_weapons);

    // Capacity bounds the world: one bullet, no queued shots, no panic.
    assert_eq!(active_bullets(&mut world).len(), 1);
    assert_eq!(world.get::<Weapon>(ship).unwrap().free_count(), 0);
}

#[test]
fn no_shot_without_shoot_intent() {
    let mut world = World::new();
    let ship = spawn_armed_ship(&mut world, BulletKind::Player, tuning(4));
    world.get_mut::<Intent>(ship).unwrap().shoot = false;
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 1.0);
    run_system_once(&mut world, fire::fire_weapons);

    assert!(active_bullets(&mut world).is_empty());
}

#[test]
fn inactive_ship_does_not_fire() {
    let mut world = World::new();
    let ship = spawn_armed_ship(&mut world, BulletKind::Enemy, tuning(4));
    *world.get_mut::<LifeState>(ship).unwrap() = LifeState::Inactive;
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 1.0);
    run_system_once(&mut world, fire::fire_weapons);

    assert!(active_bullets(&mut world).is_empty());
}

#[test]
fn flip_y_fires_downward() {
    let mut world = World::new();
    let mut t = tuning(2);
    t.flip_y = true;
    t.spawn_offset = -16.0;
    spawn_armed_ship(&mut world, BulletKind::Enemy, t);
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 0.25);
    run_system_once(&mut world, fire::fire_weapons);

    let bullet = active_bullets(&mut world)[0];
    assert_eq!(world.get::<LinearVelocity>(bullet).unwrap().0, Vec2::new(0.0, -500.0));
    assert_eq!(
        world.get::<Transform>(bullet).unwrap().translation.truncate(),
        Vec2::new(10.0, -66.0),
    );
}

#[test]
fn bullets_expire_after_lifespan() {
    let mut world = World::new();
    spawn_armed_ship(&mut world, BulletKind::Player, tuning(2));
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 0.25);
    run_system_once(&mut world, fire::fire_weapons);
    let bullet = active_bullets(&mut world)[0];

    // Lifespan is 1.0s: four ticks of 0.3s push it past the limit.
    set_fixed_delta(&mut world, 0.3);
    for _ in 0..3 {
        run_system_once(&mut world, pool::bullet_lifespan);
        assert_eq!(*world.get::<BulletState>(bullet).unwrap(), BulletState::Active);
    }
    run_system_once(&mut world, pool::bullet_lifespan);
    assert_eq!(
        *world.get::<BulletState>(bullet).unwrap(),
        BulletState::PendingReturn
    );
}

#[test]
fn commit_recycles_into_the_owning_weapon() {
    let mut world = World::new();
    let ship_a = spawn_armed_ship(&mut world, BulletKind::Player, tuning(1));
    let ship_b = spawn_armed_ship(&mut world, BulletKind::Enemy, tuning(1));
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 0.25);
    run_system_once(&mut world, fire::fire_weapons);
    assert_eq!(world.get::<Weapon>(ship_a).unwrap().free_count(), 0);
    assert_eq!(world.get::<Weapon>(ship_b).unwrap().free_count(), 0);

    // Retire both in flight, then commit.
    let bullets = active_bullets(&mut world);
    assert_eq!(bullets.len(), 2);
    for b in &bullets {
        world.get_mut::<BulletState>(*b).unwrap().retire();
    }
    run_system_once(&mut world, pool::return_to_pool_commit);

    for b in &bullets {
        assert_eq!(*world.get::<BulletState>(*b).unwrap(), BulletState::Inactive);
        assert_eq!(*world.get::<Visibility>(*b).unwrap(), Visibility::Hidden);
        assert_eq!(world.get::<LinearVelocity>(*b).unwrap().0, Vec2::ZERO);
        assert_eq!(world.get::<CollisionLayers>(*b).unwrap().filters, LayerMask::NONE);
    }

    // Each weapon got its own bullet back, not the other's.
    let pooled_owner =
        |world: &World, e: Entity| world.get::<PooledBullet>(e).unwrap().weapon;
    assert_eq!(world.get::<Weapon>(ship_a).unwrap().free_count(), 1);
    assert_eq!(world.get::<Weapon>(ship_b).unwrap().free_count(), 1);
    for b in bullets {
        let owner = pooled_owner(&world, b);
        assert!(owner == ship_a || owner == ship_b);
    }
}

#[test]
fn refire_after_recycle_reuses_the_slot() {
    let mut world = World::new();
    let ship = spawn_armed_ship(&mut world, BulletKind::Player, tuning(1));
    run_system_once(&mut world, pool::init_weapon_pools);

    set_fixed_delta(&mut world, 0.25);
    run_system_once(&mut world, fire::fire_weapons);
    let first = active_bullets(&mut world)[0];

    world.get_mut::<BulletState>(first).unwrap().retire();
    run_system_once(&mut world, pool::return_to_pool_commit);

    run_system_once(&mut world, fire::fire_weapons);
    let second = active_bullets(&mut world);
    assert_eq!(second, vec![first]); // same pooled entity, new life
    assert_eq!(world.get::<Weapon>(ship).unwrap().free_count(), 0);
}
